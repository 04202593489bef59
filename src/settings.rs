use crate::config::{ClientConfig, DEFAULT_BASE_URL};
use anyhow::{anyhow, Context};
use config::{Config, File};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use std::{collections::BTreeMap, path::Path, str::FromStr, time::Duration};
use url::Url;

pub const CONFIG_PATH_ENV: &str = "COMPILATION_CLIENT_CONFIG";
const ENV_PREFIX: &str = "COMPILATION_CLIENT";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub base_url: Url,
    /// Extra headers sent with every request, merged over the default ones.
    /// Underscores in names are sent as hyphens, so `x_api_key` (the only form an
    /// environment variable can produce) becomes `x-api-key`.
    pub headers: BTreeMap<String, String>,
    /// Upper bound for every call in milliseconds. Unbounded if not set.
    pub timeout_ms: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: Url::from_str(DEFAULT_BASE_URL).expect("valid url"),
            headers: Default::default(),
            timeout_ms: None,
        }
    }
}

impl Settings {
    /// Reads settings from the file named by `COMPILATION_CLIENT_CONFIG` (if set),
    /// overridden by `COMPILATION_CLIENT__*` environment variables.
    pub fn new() -> anyhow::Result<Self> {
        let config_path = std::env::var(CONFIG_PATH_ENV).ok();
        Self::build(config_path.as_deref().map(Path::new))
    }

    pub fn from_file(config_path: &Path) -> anyhow::Result<Self> {
        Self::build(Some(config_path))
    }

    fn build(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Config::builder();
        if let Some(config_path) = config_path {
            builder = builder.add_source(File::from(config_path));
        };
        // `__` is used as a separator, so `COMPILATION_CLIENT__HEADERS__X_API_KEY`
        // sets `headers.x_api_key`, sent as `x-api-key`
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        );

        builder
            .build()?
            .try_deserialize()
            .map_err(|err| anyhow!(err))
    }

    pub fn client_config(&self) -> anyhow::Result<ClientConfig> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let name = HeaderName::from_str(&name.replace('_', "-"))
                .with_context(|| format!("invalid header name: {name}"))?;
            let value = HeaderValue::from_str(value)
                .with_context(|| format!("invalid value for header {name}"))?;
            headers.insert(name, value);
        }

        let mut config = ClientConfig::new(self.base_url.clone()).headers(headers);
        if let Some(timeout_ms) = self.timeout_ms {
            config = config.timeout(Duration::from_millis(timeout_ms));
        }
        Ok(config)
    }
}
