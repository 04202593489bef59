mod cli;
mod client;
mod config;
mod endpoint;
mod error;
mod settings;
mod types;

pub use cli::{Args, Command};
pub use client::{Client, CompilationApi};
pub use config::{default_headers, ClientConfig, DEFAULT_BASE_URL};
pub use endpoint::{Compile, Endpoint, Health};
pub use error::{ApiError, ApiErrorKind};
pub use settings::Settings;
pub use types::{CompileFailure, CompileRequest, CompileResponse, CompileSuccess, HealthResponse};
