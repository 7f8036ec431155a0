//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered account as stored in the `accounts` table.
///
/// Credential columns are never serialized. Hand a [`PublicAccount`]
/// to anything outside the credential layer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Unique account identifier.
    pub id: Uuid,
    /// Unique login name, stored lowercase.
    pub username: String,
    /// Unique email address, stored lowercase.
    pub email: String,
    /// Human-readable display name.
    pub display_name: Option<String>,
    /// Public URL of the avatar image.
    pub avatar_url: Option<String>,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// SHA-256 digest of the single active refresh token.
    #[serde(skip_serializing)]
    pub refresh_token_hash: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Whether a refresh token is currently stored, i.e. a session can be renewed.
    pub fn has_active_session(&self) -> bool {
        self.refresh_token_hash.is_some()
    }
}

/// Sanitized account view returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicAccount {
    /// Account ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Email.
    pub email: String,
    /// Display name.
    pub display_name: Option<String>,
    /// Avatar URL.
    pub avatar_url: Option<String>,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
    /// Last login.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<Account> for PublicAccount {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            display_name: account.display_name,
            avatar_url: account.avatar_url,
            created_at: account.created_at,
            updated_at: account.updated_at,
            last_login_at: account.last_login_at,
        }
    }
}

/// Data required to create a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccount {
    /// Normalized username.
    pub username: String,
    /// Normalized email.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Display name (optional).
    pub display_name: Option<String>,
    /// Avatar URL (optional).
    pub avatar_url: Option<String>,
}

/// Data for updating an existing account's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAccount {
    /// The account ID to update.
    pub id: Uuid,
    /// New normalized email address.
    pub email: Option<String>,
    /// New display name.
    pub display_name: Option<String>,
}

/// Canonical form of a username for storage and lookup.
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

/// Canonical form of an email address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
