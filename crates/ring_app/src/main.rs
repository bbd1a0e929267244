use std::io::Write;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use ring_app::logging::{self, LogDestination};
use ring_app::{serve, AppState, RingConfig};
use ring_core::OutputFormat;
use ring_logging::ring_info;

/// Serves several OpenAPI documents merged into one.
#[derive(Debug, Parser)]
#[command(name = "swagger-ring", version, about)]
struct Cli {
    /// Configuration file (.yaml, .yml or .json).
    #[arg(short, long, env = "SWAGGER_RING_CONFIG")]
    config: PathBuf,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Also write logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the viewer and the merged documents (default).
    Serve {
        /// Overrides `listen` from the configuration.
        #[arg(long)]
        listen: Option<SocketAddr>,
    },
    /// Merge the configured documents once and print the result.
    Merge {
        #[arg(long, default_value = "yaml")]
        format: String,
        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(LogDestination::from_log_file(cli.log_file), cli.log_level);

    let config = RingConfig::load(&cli.config)
        .with_context(|| format!("loading configuration from {:?}", cli.config))?;
    ring_info!(
        "loaded {} document sources from {:?}",
        config.docs.len(),
        cli.config
    );
    let state = Arc::new(AppState::from_config(&config).context("building the http client")?);

    match cli.command.unwrap_or(Command::Serve { listen: None }) {
        Command::Serve { listen } => {
            serve(state, listen.unwrap_or(config.listen)).await?;
        }
        Command::Merge { format, output } => {
            let format: OutputFormat = format.parse()?;
            let rendered = state.aggregator().render(format).await?;
            match output {
                Some(path) => std::fs::write(&path, rendered.body)
                    .with_context(|| format!("writing {path:?}"))?,
                None => std::io::stdout().write_all(rendered.body.as_bytes())?,
            }
        }
    }
    Ok(())
}
