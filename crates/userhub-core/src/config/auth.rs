//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Longest accepted access token lifetime: one day.
pub const MAX_ACCESS_TTL_MINUTES: u64 = 24 * 60;
/// Longest accepted refresh token lifetime: one year.
pub const MAX_REFRESH_TTL_DAYS: u64 = 365;

/// Token signing and credential policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC-SHA256 secret for access tokens.
    pub access_token_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_minutes: u64,
    /// HMAC-SHA256 secret for refresh tokens. Must differ from the access secret.
    pub refresh_token_secret: String,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_days: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Minimum zxcvbn score (0-4). 0 disables the entropy check.
    #[serde(default)]
    pub password_min_score: u8,
    /// Whether token cookies carry the `Secure` attribute.
    #[serde(default = "default_true")]
    pub secure_cookies: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret: String::new(),
            access_token_ttl_minutes: default_access_ttl(),
            refresh_token_secret: String::new(),
            refresh_token_ttl_days: default_refresh_ttl(),
            password_min_length: default_password_min(),
            password_min_score: 0,
            secure_cookies: true,
        }
    }
}

impl AuthConfig {
    /// Reject configurations that would make tokens forgeable or interchangeable.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.access_token_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.access_token_secret is empty"));
        }
        if self.refresh_token_secret.trim().is_empty() {
            return Err(AppError::configuration(
                "auth.refresh_token_secret is empty",
            ));
        }
        if self.access_token_secret == self.refresh_token_secret {
            return Err(AppError::configuration(
                "auth.access_token_secret and auth.refresh_token_secret must differ",
            ));
        }
        if self.access_token_ttl_minutes == 0 || self.refresh_token_ttl_days == 0 {
            return Err(AppError::configuration("token TTLs must be positive"));
        }
        if self.access_token_ttl_minutes > MAX_ACCESS_TTL_MINUTES {
            return Err(AppError::configuration(format!(
                "auth.access_token_ttl_minutes must be at most {MAX_ACCESS_TTL_MINUTES}"
            )));
        }
        if self.refresh_token_ttl_days > MAX_REFRESH_TTL_DAYS {
            return Err(AppError::configuration(format!(
                "auth.refresh_token_ttl_days must be at most {MAX_REFRESH_TTL_DAYS}"
            )));
        }
        if self.password_min_score > 4 {
            return Err(AppError::configuration(
                "auth.password_min_score must be between 0 and 4",
            ));
        }
        Ok(())
    }

    /// Access token lifetime in seconds, clamped to the accepted maximum.
    pub fn access_ttl_seconds(&self) -> i64 {
        (self.access_token_ttl_minutes.min(MAX_ACCESS_TTL_MINUTES) * 60) as i64
    }

    /// Refresh token lifetime in seconds, clamped to the accepted maximum.
    pub fn refresh_ttl_seconds(&self) -> i64 {
        (self.refresh_token_ttl_days.min(MAX_REFRESH_TTL_DAYS) * 24 * 60 * 60) as i64
    }
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    10
}

fn default_password_min() -> usize {
    8
}

fn default_true() -> bool {
    true
}
