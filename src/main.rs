pub mod types;
pub mod errors;
pub mod config;
pub mod data;
pub mod processing;
pub mod render;
pub mod presentation;
pub mod html;
pub mod server;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the attraction map page as a standalone HTML file
    Generate {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
        /// Overrides `output.html` from the config
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Serve the attraction map
    Serve {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
    /// Print attraction counts by type
    Stats {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
    /// Write the attractions as a GeoJSON FeatureCollection
    Export {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
        /// Overrides `output.geojson` from the config
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Generate { config, output } => {
            println!("Generating map with config: {:?}", config);
            let app_config = config::AppConfig::load_from_file(config)?;

            let build = presentation::build_map(&app_config)?;
            let html = presentation::render_page(&app_config.page, &build.view, &build.statistics)?;

            let path = output.as_ref().unwrap_or(&app_config.output.html);
            fs::write(path, html).with_context(|| format!("Failed to write map page: {:?}", path))?;

            println!("Wrote {} attractions to {:?}", build.statistics.total, path);
        }
        Commands::Serve { config } => {
            println!("Serving map with config: {:?}", config);
            let app_config = config::AppConfig::load_from_file(config)?;

            // Requests reload the data themselves; this only reports problems early.
            if let Err(e) = presentation::build_map(&app_config) {
                warn!("Attraction data is not usable yet: {}", e);
            }

            server::start_server(app_config).await?;
        }
        Commands::Stats { config } => {
            let app_config = config::AppConfig::load_from_file(config)?;
            let build = presentation::build_map(&app_config)?;
            print!("{}", build.statistics.to_text());
        }
        Commands::Export { config, output } => {
            let app_config = config::AppConfig::load_from_file(config)?;
            let build = presentation::build_map(&app_config)?;
            let collection = render::to_geojson(&build.grouped);

            let path = output.as_ref().unwrap_or(&app_config.output.geojson);
            let json = serde_json::to_string_pretty(&collection)?;
            fs::write(path, json).with_context(|| format!("Failed to write GeoJSON: {:?}", path))?;

            println!("Exported {} attractions to {:?}", collection.features.len(), path);
        }
    }

    Ok(())
}
