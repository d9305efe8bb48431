use std::{path::PathBuf, sync::Arc, time::Duration};

use chrono::Utc;
use clap::{Parser, Subcommand};
use tally_patterns::{
    config::Config,
    models::ShowStatus,
    services::{providers::TmdbProvider, show_patterns},
};
use tracing_subscriber::EnvFilter;

/// Detects how a TV show releases its episodes
#[derive(Debug, Parser)]
#[command(name = "tally-patterns", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch a season from TMDB and analyze its release pattern
    Show {
        /// TMDB show id
        show_id: u64,

        #[arg(short, long, default_value_t = 1)]
        season: u32,
    },
    /// Analyze a JSON array of episodes from a file
    File {
        path: PathBuf,

        /// Show status (e.g. "Ended", "Returning Series") used for lifecycle overrides
        #[arg(long, value_parser = parse_status)]
        status: Option<ShowStatus>,
    },
}

fn parse_status(raw: &str) -> Result<ShowStatus, String> {
    Ok(ShowStatus::from(raw))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let output = match cli.command {
        Command::Show { show_id, season } => {
            let provider = TmdbProvider::new(
                config.require_tmdb_api_key()?.to_string(),
                config.tmdb_api_url.clone(),
                Duration::from_secs(config.request_timeout_secs),
            )?;

            let report =
                show_patterns::analyze_show_season(Arc::new(provider), show_id, season, Utc::now())
                    .await?;
            serde_json::to_string_pretty(&report)?
        }
        Command::File { path, status } => {
            let analysis = show_patterns::analyze_episode_file(&path, status, Utc::now())?;
            serde_json::to_string_pretty(&analysis)?
        }
    };

    println!("{}", output);
    Ok(())
}
