//! Bing-Search-RS command-line runner
//!
//! Runs one query with the configured options and prints the JSON output.

use anyhow::{Context, Result};
use bing_search_rs::{config::Settings, Search};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bing-search-rs", version)]
#[command(about = "Bing Web, News and Entity search from the command line")]
#[command(after_help = "The subscription key is read from BING_SUBSCRIPTION_KEY. \
Other BING_SEARCH_* variables override the settings file.")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "BING_SEARCH_SETTINGS_PATH")]
    config: Option<PathBuf>,

    /// Query words, joined with spaces
    #[arg(required = true)]
    query: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for results
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let query = cli.query.join(" ");
    if query.trim().is_empty() {
        anyhow::bail!("no query given");
    }

    info!("Starting Bing-Search-RS v{}", bing_search_rs::VERSION);

    let settings = load_settings(cli.config)?;
    let search = Search::new(&settings)?;

    let output = search.execute(&query).await?;
    info!("Query '{}' produced {} entries", query, output.len());

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// Load settings from file or use defaults
fn load_settings(explicit: Option<PathBuf>) -> Result<Settings> {
    if let Some(path) = explicit {
        info!("Loading settings from: {}", path.display());
        let mut settings = Settings::from_file(&path)
            .with_context(|| format!("cannot read settings from {}", path.display()))?;
        settings.merge_env()?;
        return Ok(settings);
    }

    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("bing-search-rs/settings.yml"));
    }

    for path in paths.iter() {
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            let mut settings = Settings::from_file(path)?;
            settings.merge_env()?;
            return Ok(settings);
        }
    }

    info!("No settings file found, using defaults");
    let mut settings = Settings::default();
    settings.merge_env()?;
    Ok(settings)
}
