use crate::{
    config::ClientConfig,
    endpoint::{self, Endpoint},
    error::{ApiError, ApiErrorKind},
    types::{CompileRequest, CompileResponse, HealthResponse},
};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::sync::Arc;

/// Operations provided by the compilation service.
#[async_trait]
pub trait CompilationApi: Send + Sync {
    async fn health(&self) -> Result<HealthResponse, ApiError>;
    async fn compile(&self, request: &CompileRequest) -> Result<CompileResponse, ApiError>;
}

#[derive(Debug, Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    http_client: reqwest::Client,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .default_headers(config.headers.clone())
            .build()
            .map_err(|err| {
                ApiError::new(
                    ApiErrorKind::UnknownError,
                    format!("cannot build an http client: {err}"),
                )
                .with_source(err)
            })?;
        Ok(Self {
            config: Arc::new(config),
            http_client,
        })
    }

    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        self.request(&endpoint::Health).await
    }

    /// Compiles `request.source_code`.
    ///
    /// Requests with empty source code or contract name are rejected without calling the
    /// service. Solidity errors are not an `Err`: they are returned as
    /// [`CompileResponse::Failure`].
    pub async fn compile(&self, request: &CompileRequest) -> Result<CompileResponse, ApiError> {
        let endpoint = endpoint::Compile::new(request)?;
        self.request(&endpoint).await
    }

    /// Sends the request described by `endpoint`, bounded by the configured timeout.
    pub async fn request<E: Endpoint + Sync>(&self, endpoint: &E) -> Result<E::Response, ApiError> {
        let call = self.send(endpoint);
        let result = match self.config.timeout {
            // Dropping the `send` future on elapse cancels the in-flight request.
            Some(timeout) => tokio::time::timeout(timeout, call).await.unwrap_or_else(|_| {
                Err(ApiError::timeout(format!(
                    "request to '{}' timed out after {}ms",
                    endpoint.name(),
                    timeout.as_millis()
                )))
            }),
            None => call.await,
        };
        if let Err(err) = &result {
            log::warn!(
                "request to '{}' failed: {} ({})",
                endpoint.name(),
                err,
                err.kind()
            );
        }
        result
    }

    async fn send<E: Endpoint>(&self, endpoint: &E) -> Result<E::Response, ApiError> {
        let url = endpoint.url(&self.config.base_url).map_err(|err| {
            ApiError::new(
                ApiErrorKind::UnknownError,
                format!("invalid url for '{}': {err}", endpoint.name()),
            )
            .with_source(err)
        })?;

        log::debug!("sending {} {}", endpoint.method(), url);
        let mut request = self.http_client.request(endpoint.method(), url);
        if let Some(body) = endpoint.body() {
            let body = body.map_err(|err| {
                ApiError::new(
                    ApiErrorKind::UnknownError,
                    format!("cannot serialize request body: {err}"),
                )
                .with_source(err)
            })?;
            request = request
                .header(CONTENT_TYPE, endpoint.content_type().into_owned())
                .body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|err| ApiError::from_transport(err, "request failed"))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| ApiError::from_transport(err, "cannot read response body"))?;
        log::debug!(
            "'{}' responded with {} ({} bytes)",
            endpoint.name(),
            status,
            body.len()
        );

        if !status.is_success() {
            return Err(ApiError::from_response(status, &body));
        }

        let deserializer = &mut serde_json::Deserializer::from_slice(&body);
        serde_path_to_error::deserialize(deserializer).map_err(|err| {
            ApiError::new(
                ApiErrorKind::UnknownError,
                format!("cannot parse response body: {err}"),
            )
            .with_status_code(status)
            .with_source(err)
        })
    }
}

#[async_trait]
impl CompilationApi for Client {
    async fn health(&self) -> Result<HealthResponse, ApiError> {
        Client::health(self).await
    }

    async fn compile(&self, request: &CompileRequest) -> Result<CompileResponse, ApiError> {
        Client::compile(self, request).await
    }
}
