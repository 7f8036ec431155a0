//! JWT token creation with separate access and refresh signing keys.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use userhub_core::config::AuthConfig;
use userhub_core::error::AppError;

use super::claims::{Claims, TokenClass};

/// Creates signed JWT access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC key for access tokens.
    access_key: EncodingKey,
    /// HMAC key for refresh tokens.
    refresh_key: EncodingKey,
    /// Access token lifetime.
    access_ttl: Duration,
    /// Refresh token lifetime.
    refresh_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

/// A freshly minted access + refresh token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_key: EncodingKey::from_secret(config.access_token_secret.as_bytes()),
            refresh_key: EncodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            access_ttl: Duration::seconds(config.access_ttl_seconds()),
            refresh_ttl: Duration::seconds(config.refresh_ttl_seconds()),
        }
    }

    /// Access token lifetime.
    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    /// Refresh token lifetime.
    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Mints an access token. Access tokens are never persisted.
    pub fn issue_access_token(
        &self,
        account_id: Uuid,
        username: &str,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        self.issue(account_id, username, TokenClass::Access)
    }

    /// Mints a refresh token. The caller stores it on the account, replacing any prior value.
    pub fn issue_refresh_token(
        &self,
        account_id: Uuid,
        username: &str,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        self.issue(account_id, username, TokenClass::Refresh)
    }

    /// Mints a new access + refresh token pair.
    pub fn issue_pair(&self, account_id: Uuid, username: &str) -> Result<TokenPair, AppError> {
        let (access_token, access_expires_at) = self.issue_access_token(account_id, username)?;
        let (refresh_token, refresh_expires_at) = self.issue_refresh_token(account_id, username)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }

    fn issue(
        &self,
        account_id: Uuid,
        username: &str,
        class: TokenClass,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let (key, ttl) = match class {
            TokenClass::Access => (&self.access_key, self.access_ttl),
            TokenClass::Refresh => (&self.refresh_key, self.refresh_ttl),
        };
        let exp = now + ttl;

        let claims = Claims {
            sub: account_id,
            username: username.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4(),
            token_type: class,
        };

        let token = encode(&Header::default(), &claims, key).map_err(|e| {
            AppError::internal(format!("Failed to encode {class} token: {e}"))
        })?;

        Ok((token, exp))
    }
}
