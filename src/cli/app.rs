//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::output::Output;
use super::{compile, report_cmd};
use crate::storage::{Config, OutputFormat, Project};

/// Filter applied with `--verbose`
const VERBOSE_FILTER: &str = "prdtree=debug";

/// Filter applied when nothing else is configured
const DEFAULT_FILTER: &str = "prdtree=warn";

#[derive(Parser)]
#[command(name = "prdtree")]
#[command(author, version, about = "Compile product requirement documents into task trees")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a prdtree project
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Compile a document into a task tree
    Compile {
        /// Document to read (reads stdin when omitted or `-`)
        file: Option<PathBuf>,

        /// Save the report to the project store
        #[arg(long, short)]
        save: bool,
    },

    /// Print statistics for a document
    Stats {
        /// Document to read (reads stdin when omitted or `-`)
        file: Option<PathBuf>,
    },

    /// List saved reports
    Reports,

    /// Show a saved task by ID
    Show {
        /// Task ID (e.g. d-1a2b3c4.2)
        id: String,
    },
}

/// Picks the tracing filter: RUST_LOG, then --verbose, then config, then default
fn log_filter(verbose: bool, configured: Option<&str>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let directive = if verbose {
        VERBOSE_FILTER
    } else {
        configured.unwrap_or(DEFAULT_FILTER)
    };

    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize tracing on stderr so stdout stays clean for reports
fn init_tracing(verbose: bool, configured: Option<&str>) {
    let _ = tracing_subscriber::registry()
        .with(log_filter(verbose, configured))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Loads configuration and sets up logging and output for config-aware commands
fn load_config(verbose: bool, format: Option<OutputFormat>) -> Result<(Config, Output)> {
    let config = Config::load()?;
    init_tracing(verbose, config.global.log_filter.as_deref());

    let output = Output::new(format.unwrap_or(config.global.default_format));
    tracing::debug!(project = ?config.project_root, "prdtree starting");
    Ok((config, output))
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        // Init reads no configuration
        Commands::Init { path } => {
            init_tracing(cli.verbose, None);
            let output = Output::new(cli.format.unwrap_or_default());
            let root = Project::scaffold(&path)?;
            output.success(&format!("Initialized prdtree project at {}", root.display()));
        }

        Commands::Compile { file, save } => {
            let (config, output) = load_config(cli.verbose, cli.format)?;
            compile::compile(&output, &config, file, save)?;
        }

        Commands::Stats { file } => {
            let (config, output) = load_config(cli.verbose, cli.format)?;
            compile::stats(&output, &config, file)?;
        }

        Commands::Reports => {
            let (config, output) = load_config(cli.verbose, cli.format)?;
            report_cmd::list(&output, &config)?;
        }

        Commands::Show { id } => {
            let (config, output) = load_config(cli.verbose, cli.format)?;
            report_cmd::show(&output, &config, &id)?;
        }
    }

    Ok(())
}
