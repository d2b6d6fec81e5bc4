mod returns;
mod sizes;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tallas_core::VariantMode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tallas-cli")]
#[command(about = "Size and stock tools for the store catalog")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the canonical key of each size label
    Normalize {
        #[arg(required = true)]
        labels: Vec<String>,
    },
    /// Infer the sizing mode from a product's size labels
    Mode {
        #[arg(required = true)]
        labels: Vec<String>,
    },
    /// List the size keys a sizing mode offers inputs for
    Inputs {
        /// Sizing mode (e.g. base-size-only, unique-with-cup, XS_L_COPA)
        #[arg(long)]
        mode: VariantMode,
        /// Extra cup size to offer besides the configured defaults
        #[arg(long = "cup")]
        cups: Vec<u32>,
    },
    /// Plan the size writes for an edited product (JSON file)
    Diff { file: PathBuf },
    /// Validate a return and plan its size writes (JSON file)
    CheckReturn { file: PathBuf },
    /// Validate merchandise intake lines (JSON file)
    Intake { file: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let config = tallas_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Normalize { labels }) => sizes::run_normalize(&labels),
        Some(Commands::Mode { labels }) => sizes::run_mode(&labels),
        Some(Commands::Inputs { mode, cups }) => sizes::run_inputs(&config, mode, &cups),
        Some(Commands::Diff { file }) => sizes::run_diff(&config, &file),
        Some(Commands::CheckReturn { file }) => returns::run_check_return(&config, &file),
        Some(Commands::Intake { file }) => sizes::run_intake(&file),
        None => {
            println!("tallas-cli ready; run with --help to list commands");
            Ok(())
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}
