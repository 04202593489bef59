use anyhow::Context;
use clap::Parser;
use compilation_client::{Args, Client, Command, CompileRequest, CompileResponse};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let client = Client::new(args.client_config()?)?;

    match args.command {
        Command::Health => {
            let health = client.health().await?;
            println!("{}", serde_json::to_string_pretty(&health)?);
        }
        Command::Compile { source, contract } => {
            let source_code = tokio::fs::read_to_string(&source)
                .await
                .with_context(|| format!("cannot read {}", source.display()))?;
            let response = client
                .compile(&CompileRequest::new(source_code, contract))
                .await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            if let CompileResponse::Failure(failure) = response {
                anyhow::bail!("compilation failed: {}", failure.error);
            }
        }
    }
    Ok(())
}
