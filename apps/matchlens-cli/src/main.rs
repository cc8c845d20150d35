use std::{env, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use matchlens_assembler::SummaryAssembler;
use matchlens_ops::{init_tracing, render_summary, write_summary};
use matchlens_provider::FileProvider;
use matchlens_types::config::MatchlensConfig;
use tracing::{info, warn};

const DEFAULT_CONFIG_PATH: &str = "configs/dev.toml";

#[derive(Debug, Parser)]
#[command(name = "matchlens", version, about = "Condense a match into a player-centric summary")]
struct Cli {
    /// Path to the TOML config (falls back to MATCHLENS_CONFIG, then configs/dev.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build the summary of one player in one match.
    Summarize {
        #[arg(long = "player")]
        player_id: String,
        #[arg(long = "match")]
        match_id: String,
        /// Overrides provider.data_dir.
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Write the summary here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, config_warning) = load_config(cli.config);
    init_tracing(&config.ops)?;
    if let Some(message) = config_warning {
        warn!("{message}");
    }

    match cli.command {
        Command::Summarize {
            player_id,
            match_id,
            data_dir,
            output,
            pretty,
        } => {
            let provider = match data_dir {
                Some(dir) => FileProvider::new(dir),
                None => FileProvider::from_config(&config.provider),
            };
            info!("Reading match documents from {:?}", provider.data_dir());
            let assembler = SummaryAssembler::from_config(provider, &config);
            let summary = assembler
                .build_player_summary(&player_id, &match_id)
                .await
                .with_context(|| format!("failed to summarize match {match_id}"))?;
            if summary.is_not_found() {
                info!("Player {player_id} not found in match {match_id}");
            }

            match output {
                Some(path) => {
                    write_summary(&path, &summary, pretty)?;
                }
                None => println!("{}", render_summary(&summary, pretty)?),
            }
        }
    }
    Ok(())
}

/// Loads and validates the config, falling back to defaults. Any problem is
/// returned as a message to log once tracing is up.
fn load_config(from_args: Option<PathBuf>) -> (MatchlensConfig, Option<String>) {
    let from_env = env::var("MATCHLENS_CONFIG").ok().map(PathBuf::from);
    let explicit = from_args.is_some() || from_env.is_some();
    let path = from_args
        .or(from_env)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    if !explicit && !path.exists() {
        return (default_config(), None);
    }

    match MatchlensConfig::from_file(&path) {
        Ok(cfg) => match cfg.validate() {
            Ok(()) => (cfg, None),
            Err(err) => (
                default_config(),
                Some(format!(
                    "Invalid config in '{}': {err}. Falling back to internal defaults.",
                    path.display()
                )),
            ),
        },
        Err(err) => (
            default_config(),
            Some(format!(
                "Failed to load config from '{}': {err}. Falling back to internal defaults.",
                path.display()
            )),
        ),
    }
}

fn default_config() -> MatchlensConfig {
    let config = MatchlensConfig::default();
    debug_assert!(config.validate().is_ok());
    config
}
