//! Credential store over an [`AccountStore`].

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use userhub_core::config::AuthConfig;
use userhub_core::error::AppError;
use userhub_core::result::AppResult;
use userhub_database::store::AccountStore;
use userhub_entity::account::{Account, CreateAccount, PublicAccount};

use crate::password::{PasswordHasher, PasswordValidator};

/// Input for creating an account with a plaintext password.
#[derive(Debug, Clone)]
pub struct NewCredentials {
    /// Requested username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password; hashed before it reaches the store.
    pub password: String,
    /// Optional display name.
    pub display_name: Option<String>,
    /// Optional avatar URL.
    pub avatar_url: Option<String>,
}

/// Persists accounts and verifies passwords without exposing the hash.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    /// Backing account store.
    store: Arc<dyn AccountStore>,
    /// Password hasher.
    hasher: PasswordHasher,
    /// Password policy.
    validator: PasswordValidator,
}

impl CredentialStore {
    /// Creates a credential store.
    pub fn new(store: Arc<dyn AccountStore>, config: &AuthConfig) -> Self {
        Self {
            store,
            hasher: PasswordHasher::new(),
            validator: PasswordValidator::new(config),
        }
    }

    /// The underlying account store.
    pub fn accounts(&self) -> &Arc<dyn AccountStore> {
        &self.store
    }

    /// Applies the password policy without touching the store.
    pub fn check_password(&self, password: &str) -> AppResult<()> {
        self.validator.validate(password)
    }

    /// Fails with `Conflict` when the username or email is already registered.
    ///
    /// Only improves the message; the store's uniqueness guarantee decides
    /// concurrent races.
    pub async fn check_available(&self, username: &str, email: &str) -> AppResult<()> {
        if self.store.find_by_username(username).await?.is_some() {
            return Err(AppError::conflict("Username is already taken"));
        }
        if self.store.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict("Email is already in use"));
        }
        Ok(())
    }

    /// Creates an account, hashing the password.
    ///
    /// Duplicates are rejected by the store's insert.
    pub async fn create(&self, input: NewCredentials) -> AppResult<PublicAccount> {
        self.validator.validate(&input.password)?;

        let password_hash = self.hasher.hash_password(&input.password)?;
        let account = self
            .store
            .insert(&CreateAccount {
                username: input.username,
                email: input.email,
                password_hash,
                display_name: input.display_name,
                avatar_url: input.avatar_url,
            })
            .await?;

        info!(account_id = %account.id, username = %account.username, "Account created");
        Ok(account.into())
    }

    /// Looks up an account by username or email.
    ///
    /// An identifier containing `@` is tried as an email first.
    pub async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<Account>> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Ok(None);
        }
        if identifier.contains('@')
            && let Some(account) = self.store.find_by_email(identifier).await?
        {
            return Ok(Some(account));
        }
        self.store.find_by_username(identifier).await
    }

    /// Looks up an account by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        self.store.find_by_id(id).await
    }

    /// Checks `candidate` against the account's stored hash.
    pub fn verify_password(&self, account: &Account, candidate: &str) -> bool {
        self.hasher.verify_password(candidate, &account.password_hash)
    }

    /// Replaces the password after verifying the old one.
    pub async fn change_password(
        &self,
        account_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let account = self
            .store
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::not_found("Account does not exist"))?;

        if !self.verify_password(&account, old_password) {
            return Err(AppError::unauthorized("Invalid old password"));
        }

        self.validator.validate(new_password)?;
        self.validator.validate_not_same(old_password, new_password)?;

        let password_hash = self.hasher.hash_password(new_password)?;
        self.store.update_password(account_id, &password_hash).await?;

        info!(account_id = %account_id, "Password changed");
        Ok(())
    }
}
