use crate::{settings::Settings, ClientConfig};
use clap::{Parser, Subcommand};
use std::{path::PathBuf, time::Duration};
use url::Url;

#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a config file. Overrides `COMPILATION_CLIENT_CONFIG`.
    #[clap(short, long)]
    pub config: Option<PathBuf>,
    #[clap(long)]
    pub base_url: Option<Url>,
    #[clap(long)]
    pub timeout_ms: Option<u64>,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Query the service health endpoint
    Health,
    /// Compile a solidity source file
    Compile {
        #[clap(short, long)]
        source: PathBuf,
        #[clap(short = 'n', long)]
        contract: String,
    },
}

impl Args {
    pub fn client_config(&self) -> anyhow::Result<ClientConfig> {
        let settings = match &self.config {
            Some(path) => Settings::from_file(path)?,
            None => Settings::new()?,
        };
        let mut config = settings.client_config()?;
        if let Some(base_url) = &self.base_url {
            config = config.base_url(base_url.clone());
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config = config.timeout(Duration::from_millis(timeout_ms));
        }
        Ok(config)
    }
}
