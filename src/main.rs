mod cli;
mod commands;
mod notifier;

use anyhow::Result;
use clap::Parser;
use tracing::warn;

use customerhub_core::config::AppConfig;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Every network call is awaited in sequence; one thread is plenty.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_str = std::fs::read_to_string(&cli.config).unwrap_or_else(|_| {
        warn!(path = %cli.config, "config file not found, using defaults");
        include_str!("../config/default.toml").to_string()
    });
    let mut config: AppConfig = toml::from_str(&config_str)?;

    // Environment overrides
    if let Ok(v) = std::env::var("CUSTOMERHUB_API_URL") {
        if !v.trim().is_empty() {
            config.api.base_url = v.trim().to_string();
        }
    }
    if let Ok(v) = std::env::var("CUSTOMERHUB_USER_AGENT") {
        if !v.is_empty() {
            config.client.user_agent = v;
        }
    }

    match cli.command {
        Commands::Status { wake } => {
            commands::status::run(config, wake).await?;
        }
        Commands::Register(args) => {
            commands::register::run(config, args).await?;
        }
        Commands::Customers => {
            commands::customers::run(config).await?;
        }
        Commands::Locate(location) => {
            commands::locate::run(config, location).await?;
        }
        Commands::Fingerprint { user_agent } => {
            commands::fingerprint::run(config, user_agent);
        }
    }

    Ok(())
}
