//! bikeshare CLI: inspect and validate the feature schema used by the
//! bike-sharing preprocessing pipeline.

mod commands;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Feature schema registry for the bike-sharing demand pipeline
#[derive(Parser, Debug)]
#[command(name = "bikeshare", version, about, long_about = None)]
struct Cli {
    /// Workspace directory (reads .bikeshare/schema.toml) [default: current directory]
    #[arg(short, long)]
    workspace: Option<PathBuf>,

    /// Schema file merged on top of user and workspace config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only print errors and command results, no logs or source listings
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print the effective feature schema
    Show {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Load and validate the schema
    Validate,
    /// Print the transformed column name for each key
    Name {
        /// Column names
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Print the bucket count of a bucketed feature
    Buckets {
        /// Feature name
        feature: String,
    },
    /// Print the encoding plan for every column
    Plan {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Write the built-in schema to .bikeshare/schema.toml in the workspace
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
    Toml,
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(filter));

    // JSON file layer for structured logging
    let log_dir = directories::ProjectDirs::from("dev", "bikeshare", "bikeshare")
        .map(|d| d.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("."));
    let _ = std::fs::create_dir_all(&log_dir);
    let file_appender = tracing_appender::rolling::daily(&log_dir, "bikeshare.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let workspace = commands::resolve_workspace(cli.workspace.as_deref())?;

    commands::handle_command(cli.command, &workspace, cli.config.as_deref(), cli.quiet)
}
