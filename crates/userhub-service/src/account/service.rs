//! Account registration and self-service operations.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::ValidateEmail;

use userhub_auth::credential::{CredentialStore, NewCredentials};
use userhub_core::error::AppError;
use userhub_core::result::AppResult;
use userhub_core::traits::MediaUploader;
use userhub_entity::account::{PublicAccount, UpdateAccount};
use userhub_media::{StagedFile, discard, upload_and_discard};

use crate::context::RequestContext;

/// Longest accepted username, in characters.
const MAX_USERNAME_LENGTH: usize = 64;

/// Registration input.
#[derive(Debug, Clone, Default)]
pub struct RegisterAccount {
    /// Requested username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Optional display name.
    pub display_name: Option<String>,
    /// Avatar image already written to the temp directory.
    pub avatar: Option<StagedFile>,
}

/// Profile fields an account may change about itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfile {
    /// New display name.
    pub display_name: Option<String>,
    /// New email address.
    pub email: Option<String>,
}

/// Handles registration and account self-service.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// Credential store.
    credentials: Arc<CredentialStore>,
    /// Avatar relay.
    uploader: Arc<dyn MediaUploader>,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(credentials: Arc<CredentialStore>, uploader: Arc<dyn MediaUploader>) -> Self {
        Self {
            credentials,
            uploader,
        }
    }

    /// Registers a new account.
    ///
    /// The staged avatar is always removed from disk. A failed avatar
    /// upload does not fail registration; the account is created without one.
    pub async fn register(&self, input: RegisterAccount) -> AppResult<PublicAccount> {
        let RegisterAccount {
            username,
            email,
            password,
            display_name,
            avatar,
        } = input;

        if let Err(e) = self.check_registration(&username, &email, &password).await {
            if let Some(staged) = &avatar {
                discard(&staged.path).await;
            }
            return Err(e);
        }

        let avatar_url = match avatar {
            Some(staged) => match upload_and_discard(self.uploader.as_ref(), &staged.path).await
            {
                Ok(media) => Some(media.url),
                Err(e) => {
                    warn!(
                        username = %username.trim(),
                        provider = self.uploader.provider_name(),
                        error = %e,
                        "Avatar upload failed; registering without avatar"
                    );
                    None
                }
            },
            None => None,
        };

        let account = self
            .credentials
            .create(NewCredentials {
                username: username.trim().to_string(),
                email: email.trim().to_string(),
                password,
                display_name: display_name
                    .map(|d| d.trim().to_string())
                    .filter(|d| !d.is_empty()),
                avatar_url,
            })
            .await?;

        info!(account_id = %account.id, "Account registered");
        Ok(account)
    }

    /// Field, password-policy, and duplicate checks, run before any upload.
    async fn check_registration(&self, username: &str, email: &str, password: &str) -> AppResult<()> {
        if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(AppError::validation(
                "Username, email, and password are required",
            ));
        }
        validate_username(username)?;
        validate_email(email)?;
        self.credentials.check_password(password)?;
        self.credentials.check_available(username, email).await
    }

    /// Returns the signed-in account as currently stored.
    pub async fn current_account(&self, ctx: &RequestContext) -> AppResult<PublicAccount> {
        self.credentials
            .find_by_id(ctx.account_id())
            .await?
            .map(PublicAccount::from)
            .ok_or_else(|| AppError::not_found("Account does not exist"))
    }

    /// Updates the signed-in account's display name and/or email.
    pub async fn update_account(
        &self,
        ctx: &RequestContext,
        req: UpdateProfile,
    ) -> AppResult<PublicAccount> {
        if req.display_name.is_none() && req.email.is_none() {
            return Err(AppError::validation(
                "At least one of display_name or email is required",
            ));
        }

        let display_name = match req.display_name {
            Some(name) if name.trim().is_empty() => {
                return Err(AppError::validation("Display name cannot be empty"));
            }
            Some(name) => Some(name.trim().to_string()),
            None => None,
        };

        let email = match req.email {
            Some(email) => {
                validate_email(&email)?;
                if let Some(existing) = self.credentials.accounts().find_by_email(&email).await?
                    && existing.id != ctx.account_id()
                {
                    return Err(AppError::conflict("Email is already in use"));
                }
                Some(email.trim().to_string())
            }
            None => None,
        };

        let account = self
            .credentials
            .accounts()
            .update_profile(&UpdateAccount {
                id: ctx.account_id(),
                email,
                display_name,
            })
            .await?;

        info!(
            account_id = %account.id,
            ip = ctx.ip_address.as_deref().unwrap_or("-"),
            user_agent = ctx.user_agent.as_deref().unwrap_or("-"),
            requested_at = %ctx.request_time,
            "Account updated"
        );
        Ok(account.into())
    }

    /// Changes the signed-in account's password.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        old_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        if old_password.is_empty() || new_password.is_empty() {
            return Err(AppError::validation(
                "Old and new passwords are required",
            ));
        }
        self.credentials
            .change_password(ctx.account_id(), old_password, new_password)
            .await?;

        info!(
            account_id = %ctx.account_id(),
            ip = ctx.ip_address.as_deref().unwrap_or("-"),
            user_agent = ctx.user_agent.as_deref().unwrap_or("-"),
            requested_at = %ctx.request_time,
            "Password change completed"
        );
        Ok(())
    }
}

fn validate_username(username: &str) -> AppResult<()> {
    let username = username.trim();
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(AppError::validation(format!(
            "Username must be at most {MAX_USERNAME_LENGTH} characters long"
        )));
    }
    if username.chars().any(|c| c.is_whitespace() || c == '@') {
        return Err(AppError::validation(
            "Username cannot contain whitespace or '@'",
        ));
    }
    Ok(())
}

fn validate_email(email: &str) -> AppResult<()> {
    if email.trim().is_empty() {
        return Err(AppError::validation("Email cannot be empty"));
    }
    if !email.trim().validate_email() {
        return Err(AppError::validation("Invalid email format"));
    }
    Ok(())
}
