//! Account management commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use userhub_auth::CredentialStore;
use userhub_core::error::AppError;
use userhub_entity::account::{Account, PublicAccount};
use userhub_media::DisabledUploader;
use userhub_service::{AccountService, RegisterAccount};

use super::Cli;
use crate::output::{self, OutputFormat};

/// Arguments for account commands
#[derive(Debug, Args)]
pub struct AccountArgs {
    /// Account subcommand
    #[command(subcommand)]
    pub command: AccountCommand,
}

/// Account subcommands
#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// List accounts, newest first
    List {
        /// Maximum rows to show
        #[arg(short, long, default_value_t = 50)]
        limit: i64,
        /// Rows to skip
        #[arg(short, long, default_value_t = 0)]
        offset: i64,
    },
    /// Show one account by username or email
    Show {
        /// Username or email
        identifier: String,
    },
    /// Create an account; prompts for the password when not given
    Create {
        /// Username
        username: String,
        /// Email address
        email: String,
        /// Display name
        #[arg(short, long)]
        display_name: Option<String>,
        /// Password (prompted if omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Revoke the stored refresh token, ending the account's session
    Revoke {
        /// Username or email
        identifier: String,
    },
}

/// Account display row for table output
#[derive(Debug, Serialize, Tabled)]
struct AccountRow {
    id: String,
    username: String,
    email: String,
    display_name: String,
    session: String,
    last_login: String,
    created_at: String,
}

impl From<&Account> for AccountRow {
    fn from(a: &Account) -> Self {
        Self {
            id: a.id.to_string(),
            username: a.username.clone(),
            email: a.email.clone(),
            display_name: a.display_name.clone().unwrap_or_default(),
            session: if a.has_active_session() { "active" } else { "-" }.to_string(),
            last_login: a
                .last_login_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "never".to_string()),
            created_at: a.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute account commands
pub async fn execute(args: &AccountArgs, cli: &Cli, format: OutputFormat) -> Result<(), AppError> {
    let config = cli.load_config()?;
    let store = super::open_store(&config).await?;
    let credentials = Arc::new(CredentialStore::new(store, &config.auth));

    match &args.command {
        AccountCommand::List { limit, offset } => {
            let accounts = credentials.accounts().list(*limit, *offset).await?;
            let rows: Vec<AccountRow> = accounts.iter().map(AccountRow::from).collect();
            output::print_list(&rows, format);
        }
        AccountCommand::Show { identifier } => {
            let account = find(&credentials, identifier).await?;
            match format {
                OutputFormat::Json => output::print_json(&PublicAccount::from(account)),
                OutputFormat::Table => {
                    let row = AccountRow::from(&account);
                    output::print_kv("ID", &row.id);
                    output::print_kv("Username", &row.username);
                    output::print_kv("Email", &row.email);
                    output::print_kv("Display name", &row.display_name);
                    output::print_kv("Avatar", account.avatar_url.as_deref().unwrap_or("-"));
                    output::print_kv("Session", &row.session);
                    output::print_kv("Last login", &row.last_login);
                    output::print_kv("Created", &row.created_at);
                }
            }
        }
        AccountCommand::Create {
            username,
            email,
            display_name,
            password,
        } => {
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            let service = AccountService::new(credentials, Arc::new(DisabledUploader));
            let account = service
                .register(RegisterAccount {
                    username: username.clone(),
                    email: email.clone(),
                    password,
                    display_name: display_name.clone(),
                    avatar: None,
                })
                .await?;

            match format {
                OutputFormat::Json => output::print_json(&account),
                OutputFormat::Table => output::print_success(&format!(
                    "Account '{}' created ({})",
                    account.username, account.id
                )),
            }
        }
        AccountCommand::Revoke { identifier } => {
            let account = find(&credentials, identifier).await?;
            if !account.has_active_session() {
                output::print_warning(&format!("'{}' has no active session", account.username));
                return Ok(());
            }
            credentials
                .accounts()
                .set_refresh_token(account.id, None)
                .await?;
            output::print_success(&format!("Session revoked for '{}'", account.username));
        }
    }

    Ok(())
}

async fn find(credentials: &CredentialStore, identifier: &str) -> Result<Account, AppError> {
    credentials
        .find_by_identifier(identifier)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Account '{identifier}' not found")))
}
