mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use calcut_core::split::ModeKind;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "calcut")]
#[command(about = "Split an iCalendar (.ics) file into one file per event or size-bounded chunks")]
#[command(version)]
struct Cli {
    /// Show debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a calendar file
    Split {
        /// Input .ics file
        input: PathBuf,

        /// Output directory (default: ./split_output)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Prefix for output filenames
        #[arg(short, long)]
        prefix: Option<String>,

        /// Maximum size per file (e.g. 1M, 512K, 2MB). Without it, one file per event
        #[arg(short = 's', long)]
        max_size: Option<String>,

        /// Splitting strategy: per-event or by-size
        #[arg(short, long)]
        mode: Option<ModeKind>,

        /// Print a JSON manifest instead of progress output
        #[arg(long)]
        json: bool,
    },
    /// Show what a calendar file contains without splitting it
    Info {
        /// Input .ics file
        input: PathBuf,

        /// List every event
        #[arg(short, long)]
        list: bool,
    },
    /// Show the config file location and effective settings
    Config {
        /// Write a commented default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Split {
            input,
            output_dir,
            prefix,
            max_size,
            mode,
            json,
        } => commands::split::run(commands::split::SplitArgs {
            input,
            output_dir,
            prefix,
            max_size,
            mode,
            json,
        }),
        Commands::Info { input, list } => commands::info::run(&input, list),
        Commands::Config { init } => commands::config::run(init),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
