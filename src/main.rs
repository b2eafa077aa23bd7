//! dfs-persona - Build a behavioral profile from a DFS contest history export
//!
//! Reads a DraftKings or FanDuel CSV export, runs the profiling pipeline and
//! prints the resulting profile as JSON on stdout. Logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dfs_persona::adapters::SystemClock;
use dfs_persona::application::{BuildProfileCommand, BuildProfileHandler};
use dfs_persona::config::{LogFormat, LoggingConfig, ProfileConfig};
use dfs_persona::domain::foundation::DomainError;

/// Command-line arguments for dfs-persona
#[derive(Parser, Debug)]
#[command(name = "dfs-persona")]
#[command(about = "Behavioral profiling of DFS contest history exports")]
#[command(version)]
struct Args {
    /// CSV export to profile
    csv: PathBuf,

    /// YAML configuration file (defaults to DFS_PERSONA__* environment variables)
    #[arg(short, long, env = "DFS_PERSONA_CONFIG")]
    config: Option<PathBuf>,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => logging.env_filter()?,
    };

    let (json, pretty) = match logging.format {
        LogFormat::Json => (
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
            None,
        ),
        LogFormat::Pretty => (
            None,
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(pretty)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ProfileConfig::from_yaml_file(path)?,
        None => ProfileConfig::load()?,
    };
    config.validate().context("Invalid configuration")?;

    init_tracing(&config.logging)?;

    info!(path = %args.csv.display(), "Reading contest history");
    let csv = std::fs::read_to_string(&args.csv)
        .with_context(|| format!("Failed to read {}", args.csv.display()))?;

    let handler = BuildProfileHandler::new(Arc::new(SystemClock), &config)?;
    let profile = match handler.handle(BuildProfileCommand::new(csv)) {
        Ok(profile) => profile,
        Err(err) => {
            let err = DomainError::from(err);
            error!(code = %err.code, details = ?err.details, "Failed to build profile");
            return Err(err.into());
        }
    };

    let json = if args.compact {
        serde_json::to_string(&profile)?
    } else {
        serde_json::to_string_pretty(&profile)?
    };
    println!("{}", json);

    Ok(())
}
