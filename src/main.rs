//! Restyle - fetch third-party pages, render them in a sandbox and restyle
//! them from free-text requests.
//!
//! Main entry point for the Restyle CLI and server.

mod cli;
mod commands;
mod server;

use clap::Parser;
use tracing::warn;

use restyle_config::{ConfigLoader, ConfigValidator};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::load_or_default(&cli.config)?;
    server::init_tracing(&config.logging)?;

    let warnings = ConfigValidator::validate(&config).into_result()?;
    for warning in warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }

    match cli.command {
        None => server::run_server(config).await,
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            server::run_server(config).await
        }
        Some(Commands::Fetch { url }) => commands::fetch(&config, &url).await,
        Some(Commands::Apply {
            url,
            reply,
            prompt,
            select,
        }) => {
            commands::apply_to_page(
                &config,
                &url,
                reply.as_deref(),
                prompt.as_deref(),
                select.as_deref(),
            )
            .await
        }
        Some(Commands::Scope {
            css_file,
            container,
        }) => commands::scope(&css_file, &container),
    }
}
