//! Database migration commands.

use clap::{Args, Subcommand};

use userhub_core::config::DatabaseBackend;
use userhub_core::error::AppError;
use userhub_database::DatabasePool;
use userhub_database::connection::mask_password;

use super::Cli;
use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Apply all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, cli: &Cli) -> Result<(), AppError> {
    let config = cli.load_config()?;

    if config.database.backend != DatabaseBackend::Postgres {
        output::print_warning("The memory backend has no schema; nothing to migrate.");
        return Ok(());
    }

    match &args.command {
        MigrateCommand::Run => {
            println!(
                "Running migrations against {}...",
                mask_password(&config.database.url)
            );
            let pool = DatabasePool::connect(&config.database).await?;
            userhub_database::migration::run_migrations(pool.pool()).await?;
            output::print_success("All migrations applied.");
        }
    }

    Ok(())
}
