//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod assignment;
pub mod config;
pub mod export;
pub mod import;

use am_core::assignment::AssignmentManager;
use am_core::config::Config;
use am_storage::FileSystemStore;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = ".assignment-maker/config.toml";

/// assignment-maker - Author assignments and export submission bundles
#[derive(Debug, Parser)]
#[command(name = "assignment-maker")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Assignment data directory (overrides the configuration)
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List saved assignments, most recently updated first
    List(assignment::ListArgs),

    /// Show one assignment
    Show(assignment::ShowArgs),

    /// Create a new assignment
    New(assignment::NewArgs),

    /// Import an assignment JSON document
    Import(import::ImportArgs),

    /// Add the built-in example assignment
    Example,

    /// Save a copy of an assignment with fresh ids
    Duplicate(assignment::DuplicateArgs),

    /// Delete an assignment
    Delete(assignment::DeleteArgs),

    /// Move a problem up or down by one position
    MoveProblem(assignment::MoveProblemArgs),

    /// Export an assignment bundle or a single artifact
    Export(export::ExportArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Settings shared by every command
pub struct AppContext {
    pub config: Config,
    pub config_path: PathBuf,
    pub store_dir: PathBuf,
}

impl AppContext {
    fn load(cli: &Cli) -> Result<Self> {
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        // `config init` is how a missing file gets created
        let creating = matches!(
            cli.command,
            Commands::Config(config::ConfigCommand::Init { .. })
        );
        if cli.config.is_some() && !creating && !config_path.exists() {
            anyhow::bail!("Configuration file not found: {}", config_path.display());
        }

        let config = Config::load_or_default(&config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()))?;

        let store_dir = cli
            .store_dir
            .clone()
            .or_else(|| config.storage.dir.clone())
            .unwrap_or_else(FileSystemStore::default_dir);

        tracing::debug!(
            "Config {:?}, store {:?}",
            config_path,
            store_dir
        );

        Ok(Self {
            config,
            config_path,
            store_dir,
        })
    }

    /// Open the assignment store
    pub fn manager(&self) -> Result<AssignmentManager> {
        let store = FileSystemStore::new(&self.store_dir).with_context(|| {
            format!("Failed to open assignment store at {}", self.store_dir.display())
        })?;
        Ok(AssignmentManager::new(store))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    let ctx = AppContext::load(&cli)?;

    // Dispatch to command handler
    match cli.command {
        Commands::List(args) => assignment::list(&ctx, args),
        Commands::Show(args) => assignment::show(&ctx, args),
        Commands::New(args) => assignment::create(&ctx, args),
        Commands::Import(args) => import::execute(&ctx, args),
        Commands::Example => assignment::example(&ctx),
        Commands::Duplicate(args) => assignment::duplicate(&ctx, args),
        Commands::Delete(args) => assignment::delete(&ctx, args),
        Commands::MoveProblem(args) => assignment::move_problem(&ctx, args),
        Commands::Export(args) => export::execute(&ctx, args),
        Commands::Config(cmd) => config::execute(&ctx, cmd),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
