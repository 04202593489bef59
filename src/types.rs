use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileRequest {
    pub source_code: String,
    pub contract_name: String,
}

impl CompileRequest {
    pub fn new(source_code: impl Into<String>, contract_name: impl Into<String>) -> Self {
        Self {
            source_code: source_code.into(),
            contract_name: contract_name.into(),
        }
    }
}

/// Outcome of a compilation as reported by the service.
///
/// The service reports failed compilations (e.g. invalid solidity) with a successful http
/// status and an `error` field, so both variants come from a `2xx` response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CompileResponse {
    Failure(CompileFailure),
    Success(CompileSuccess),
}

/// A payload with an `error` field is a failure even if it carries partial artifacts.
/// Errors of the chosen variant keep the path of the offending field (e.g. `abi[0]`).
impl<'de> Deserialize<'de> for CompileResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        fn variant<T: serde::de::DeserializeOwned, E: serde::de::Error>(
            value: Value,
        ) -> Result<T, E> {
            serde_path_to_error::deserialize(value).map_err(E::custom)
        }

        let value = Value::deserialize(deserializer)?;
        if !value.is_object() {
            return Err(D::Error::custom(format!(
                "expected a json object, got {value}"
            )));
        }
        if value.get("error").is_some() {
            variant(value).map(CompileResponse::Failure)
        } else {
            variant(value).map(CompileResponse::Success)
        }
    }
}

impl CompileResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, CompileResponse::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, CompileResponse::Failure(_))
    }

    pub fn into_result(self) -> Result<CompileSuccess, CompileFailure> {
        match self {
            CompileResponse::Success(success) => Ok(success),
            CompileResponse::Failure(failure) => Err(failure),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileSuccess {
    pub abi: Vec<Value>,
    pub bytecode: String,
    #[serde(default)]
    pub deployed_bytecode: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl CompileSuccess {
    pub fn contract_abi(&self) -> Result<ethabi::Contract, serde_json::Error> {
        serde_json::from_value(Value::Array(self.abi.clone()))
    }

    pub fn bytecode_bytes(&self) -> Result<Vec<u8>, hex::FromHexError> {
        decode_hex(&self.bytecode)
    }

    pub fn deployed_bytecode_bytes(&self) -> Result<Vec<u8>, hex::FromHexError> {
        decode_hex(&self.deployed_bytecode)
    }
}

fn decode_hex(value: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let value = value.trim();
    hex::decode(value.strip_prefix("0x").unwrap_or(value))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileFailure {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Status payload of the service, passed through as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HealthResponse(pub Value);

impl HealthResponse {
    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(Value::as_str)
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}
