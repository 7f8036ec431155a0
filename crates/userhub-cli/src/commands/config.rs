//! Configuration inspection commands.

use clap::{Args, Subcommand};

use userhub_core::config::AppConfig;
use userhub_core::error::AppError;
use userhub_database::connection::mask_password;

use super::Cli;
use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration with secrets masked
    Show,
    /// Load and validate the configuration
    Validate,
}

/// Execute config commands
pub async fn execute(args: &ConfigArgs, cli: &Cli, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = redact(cli.load_config()?);
            match format {
                OutputFormat::Json => output::print_json(&config),
                OutputFormat::Table => {
                    output::print_kv(
                        "Server",
                        &format!("{}:{}", config.server.host, config.server.port),
                    );
                    output::print_kv("Database", &format!("{:?}", config.database.backend));
                    output::print_kv("Database URL", &config.database.url);
                    output::print_kv(
                        "Access token TTL",
                        &format!("{} min", config.auth.access_token_ttl_minutes),
                    );
                    output::print_kv(
                        "Refresh token TTL",
                        &format!("{} days", config.auth.refresh_token_ttl_days),
                    );
                    output::print_kv("Secure cookies", &config.auth.secure_cookies.to_string());
                    output::print_kv("Media provider", &format!("{:?}", config.media.provider));
                    output::print_kv("Temp dir", &config.media.temp_dir);
                    output::print_kv("Log level", &config.logging.level);
                }
            }
        }
        ConfigCommand::Validate => match cli.load_config() {
            Ok(config) => {
                output::print_success("Configuration is valid");
                output::print_kv(
                    "Server",
                    &format!("{}:{}", config.server.host, config.server.port),
                );
                output::print_kv("Database", &mask_password(&config.database.url));
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {e}"));
                return Err(e);
            }
        },
    }

    Ok(())
}

const MASK: &str = "****";

fn redact(mut config: AppConfig) -> AppConfig {
    config.database.url = mask_password(&config.database.url);
    config.auth.access_token_secret = MASK.to_string();
    config.auth.refresh_token_secret = MASK.to_string();
    if !config.media.api_secret.is_empty() {
        config.media.api_secret = MASK.to_string();
    }
    config
}

#[cfg(test)]
mod tests {
    use userhub_core::config::{AuthConfig, DatabaseConfig};

    use super::*;

    #[test]
    fn test_redact_hides_secrets() {
        let config = AppConfig {
            server: Default::default(),
            database: DatabaseConfig {
                url: "postgres://app:hunter2@db/userhub".to_string(),
                ..DatabaseConfig::default()
            },
            auth: AuthConfig {
                access_token_secret: "a".to_string(),
                refresh_token_secret: "r".to_string(),
                ..AuthConfig::default()
            },
            media: Default::default(),
            logging: Default::default(),
        };

        let shown = serde_json::to_string(&redact(config)).unwrap();
        assert!(!shown.contains("hunter2"));
        assert!(!shown.contains("\"a\""));
        assert!(shown.contains(MASK));
    }
}
