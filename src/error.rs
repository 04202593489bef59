use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Category of a failed call to the compilation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// The request was rejected locally or the service answered with `400`.
    ValidationError,
    NetworkError,
    TimeoutError,
    /// The service answered with `500`.
    CompilationError,
    UnknownError,
}

impl ApiErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiErrorKind::ValidationError => "VALIDATION_ERROR",
            ApiErrorKind::NetworkError => "NETWORK_ERROR",
            ApiErrorKind::TimeoutError => "TIMEOUT_ERROR",
            ApiErrorKind::CompilationError => "COMPILATION_ERROR",
            ApiErrorKind::UnknownError => "UNKNOWN_ERROR",
        }
    }

    /// Kind of the error reported by a non-successful http response.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::BAD_REQUEST => ApiErrorKind::ValidationError,
            StatusCode::INTERNAL_SERVER_ERROR => ApiErrorKind::CompilationError,
            _ => ApiErrorKind::UnknownError,
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The only error returned by [`Client`](crate::Client) operations.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ApiError {
    kind: ApiErrorKind,
    message: String,
    status_code: Option<StatusCode>,
    #[source]
    source: Option<BoxError>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
            source: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::ValidationError, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::TimeoutError, message)
    }

    pub fn with_status_code(mut self, status_code: StatusCode) -> Self {
        self.status_code = Some(status_code);
        self
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Builds an error from a non-successful http response.
    ///
    /// `body` is only used to extract an `{"error": "..."}` message; when it cannot be
    /// parsed the message falls back to `HTTP <code>: <reason>`.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            error: String,
        }

        let message = serde_json::from_slice::<ErrorBody>(body)
            .map(|body| body.error)
            .unwrap_or_else(|_| {
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or_default()
                )
            });
        Self::new(ApiErrorKind::from_status(status), message).with_status_code(status)
    }

    /// Classifies a failure raised by the http transport before a response was received.
    ///
    /// `default_message` is used when the underlying error has an empty description.
    pub fn from_transport(err: reqwest::Error, default_message: &str) -> Self {
        let kind = if err.is_timeout() {
            ApiErrorKind::TimeoutError
        } else if err.is_connect() || err.is_request() || err.is_body() {
            ApiErrorKind::NetworkError
        } else {
            ApiErrorKind::UnknownError
        };
        let message = match err.to_string() {
            message if message.is_empty() => default_message.to_string(),
            message => message,
        };
        let status_code = err.status();
        let mut error = Self::new(kind, message).with_source(err);
        error.status_code = status_code;
        error
    }

    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> Option<StatusCode> {
        self.status_code
    }
}
