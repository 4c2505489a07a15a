//! labelrank CLI — evaluate label predictions against ground truth.
//!
//! Reads a vocabulary file, a ground truth JSON file and a predictions JSON
//! file, and prints MAP, MRR, NDCG, R-precision, P@3 and P@5.

mod commands;
mod render;

use clap::Parser;
use labelrank_eval::config::LoggingConfig;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// labelrank: ranking-quality metrics for keyword and label predictions
#[derive(Parser, Debug)]
#[command(name = "labelrank", version, about, long_about = None)]
struct Cli {
    /// Workspace directory (searched for .labelrank/config.toml)
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Evaluate predictions and print the ranking metrics
    Evaluate {
        /// Predictions JSON (aligned arrays or a list of records)
        #[arg(short, long)]
        predictions: PathBuf,
        /// Ground truth JSON object: doc id -> list of labels
        #[arg(short, long)]
        ground_truth: PathBuf,
        /// Label vocabulary, one label per line (falls back to config)
        #[arg(long)]
        vocabulary: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
        /// Include per-document scores
        #[arg(long)]
        per_document: bool,
        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand, Debug)]
enum ConfigAction {
    /// Create default configuration file
    Init,
    /// Show current configuration
    Show,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Json,
    Table,
}

impl From<FormatArg> for labelrank_eval::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Self::Json,
            FormatArg::Table => Self::Table,
        }
    }
}

/// Human-readable stderr logging, plus an optional JSON file layer.
///
/// The returned guard must live until exit so buffered file logs are flushed.
fn init_tracing(verbose: u8, quiet: bool, logging: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(EnvFilter::new(filter));

    let (json_layer, guard) = if logging.json_file {
        let log_dir = logging.resolved_log_dir();
        let _ = std::fs::create_dir_all(&log_dir);
        let file_appender = tracing_appender::rolling::daily(&log_dir, "labelrank.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(non_blocking)
            .with_filter(EnvFilter::new("debug"));
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    guard
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let workspace = cli
        .workspace
        .canonicalize()
        .unwrap_or_else(|_| cli.workspace.clone());

    let config = labelrank_eval::load_config(Some(&workspace), cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    let _guard = init_tracing(cli.verbose, cli.quiet, &config.logging);
    tracing::debug!(workspace = %workspace.display(), "Configuration loaded");

    commands::handle_command(cli.command, config, &workspace)
}
