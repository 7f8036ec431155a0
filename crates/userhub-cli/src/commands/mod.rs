//! CLI command definitions and dispatch.

pub mod account;
pub mod config;
pub mod migrate;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use userhub_core::config::AppConfig;
use userhub_core::error::AppError;
use userhub_database::{AccountStore, connect_store};

use crate::output::OutputFormat;

/// UserHub account administration
#[derive(Debug, Parser)]
#[command(name = "userhub", version, about, long_about = None)]
pub struct Cli {
    /// Explicit configuration file; overrides `--env`
    #[arg(short, long)]
    pub config: Option<String>,

    /// Environment overlay loaded on top of config/default.toml
    #[arg(short, long, env = "USERHUB_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Account management
    Account(account::AccountArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, self).await,
            Commands::Account(args) => account::execute(args, self, self.format).await,
            Commands::Config(args) => config::execute(args, self, self.format).await,
        }
    }

    /// Load configuration from `--config` or the `--env` overlay.
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        match &self.config {
            Some(path) => AppConfig::load_file(path),
            None => AppConfig::load(&self.env),
        }
    }
}

/// Open the configured account store.
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn AccountStore>, AppError> {
    connect_store(&config.database).await
}
