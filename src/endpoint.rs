use crate::{
    error::ApiError,
    types::{CompileRequest, CompileResponse, HealthResponse},
};
use serde::Deserialize;
use std::{borrow::Cow, fmt::Debug};
use url::Url;

/// Represents a specification for a call to the compilation service that can be built into
/// an HTTP request and sent.
///
/// If the request succeeds, the call will resolve to a `Response`.
pub trait Endpoint {
    type Response: for<'a> Deserialize<'a> + Debug;

    /// The HTTP Method used for this endpoint (e.g. GET, POST)
    fn method(&self) -> reqwest::Method;

    /// The path for this endpoint relative to the service base url.
    fn path(&self) -> &'static str;

    /// The HTTP body associated with this endpoint. If not implemented, defaults to `None`.
    #[inline]
    fn body(&self) -> Option<Result<String, serde_json::Error>> {
        None
    }

    /// Builds the full url of the endpoint.
    ///
    /// The base url is treated as a directory, so `http://host/api` and `http://host/api/`
    /// both resolve `health` to `http://host/api/health`.
    fn url(&self, base_url: &Url) -> Result<Url, url::ParseError> {
        let mut base_url = base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        base_url.join(self.path().trim_start_matches('/'))
    }

    /// If `body` is populated, indicates the body MIME type (defaults to JSON).
    fn content_type(&self) -> Cow<'static, str> {
        Cow::Borrowed("application/json")
    }

    /// Used in logs and error messages.
    fn name(&self) -> &'static str {
        self.path()
    }
}

pub struct Health;

impl Endpoint for Health {
    type Response = HealthResponse;

    fn method(&self) -> reqwest::Method {
        reqwest::Method::GET
    }

    fn path(&self) -> &'static str {
        "health"
    }
}

/// Can only be built from a request that passed validation, so an invalid request
/// never reaches the service whichever way the endpoint is sent.
pub struct Compile<'a> {
    request: &'a CompileRequest,
}

impl<'a> Compile<'a> {
    pub fn new(request: &'a CompileRequest) -> Result<Self, ApiError> {
        validate(request)?;
        Ok(Self { request })
    }

    pub fn request(&self) -> &CompileRequest {
        self.request
    }
}

fn validate(request: &CompileRequest) -> Result<(), ApiError> {
    if request.source_code.trim().is_empty() {
        return Err(ApiError::validation("sourceCode cannot be empty"));
    }
    if request.contract_name.is_empty() {
        return Err(ApiError::validation("contractName cannot be empty"));
    }
    Ok(())
}

impl Endpoint for Compile<'_> {
    type Response = CompileResponse;

    fn method(&self) -> reqwest::Method {
        reqwest::Method::POST
    }

    fn path(&self) -> &'static str {
        "compile"
    }

    #[inline]
    fn body(&self) -> Option<Result<String, serde_json::Error>> {
        Some(serde_json::to_string(self.request))
    }
}
