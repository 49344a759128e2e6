use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use smwgeo::config::Config;

mod commands;

use commands::ResolverArgs;

#[derive(Parser)]
#[command(
    name = "smwgeo",
    version,
    about = "Geocode place names through Semantic MediaWiki RDF exports",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file (defaults to SMWGEO_* environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a place name to coordinates
    Geocode {
        /// Place name, e.g. "Brandenburg Gate"
        query: String,

        #[command(flatten)]
        resolver: ResolverArgs,
    },

    /// Resolve starting from an article URL
    Resolve {
        /// Article URL
        url: String,

        #[command(flatten)]
        resolver: ResolverArgs,
    },

    /// Show the RDF export link and entities of an article
    Inspect {
        /// Article URL
        url: String,

        /// MIME type of the RDF alternate link
        #[arg(long)]
        mime_type: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }

    setup_tracing(&config.logging.format, &config.logging.level, cli.verbose)?;

    tracing::info!("smwgeo starting");

    match cli.command {
        Commands::Geocode { query, resolver } => {
            tracing::info!(query = %query, "Starting geocode command");
            commands::geocode(&query, config, resolver).await?;
        }

        Commands::Resolve { url, resolver } => {
            tracing::info!(url = %url, "Starting resolve command");
            commands::resolve(&url, config, resolver).await?;
        }

        Commands::Inspect { url, mime_type } => {
            tracing::info!(url = %url, "Starting inspect command");
            let mime_type = mime_type.unwrap_or_else(|| config.resolver.rdf_mime_type.clone());
            commands::inspect(&url, &mime_type, &config)
                .await
                .context("Inspect failed")?;
        }
    }

    tracing::info!("smwgeo completed successfully");
    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("smwgeo=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("smwgeo={level},warn"))
            .context("Invalid log level")?
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
