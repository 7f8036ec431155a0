//! Session lifecycle manager: login, logout, refresh token flows.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use userhub_core::error::AppError;
use userhub_core::result::AppResult;
use userhub_entity::account::PublicAccount;

use crate::credential::CredentialStore;
use crate::jwt::{JwtDecoder, JwtEncoder, TokenPair};

use super::digest::token_digest;

/// Result of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginOutcome {
    /// The authenticated account.
    pub account: PublicAccount,
    /// Generated token pair.
    pub tokens: TokenPair,
}

/// Manages the session lifecycle on top of the credential store and token issuer.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// Account lookup and password verification.
    credentials: Arc<CredentialStore>,
    /// Token minting.
    encoder: Arc<JwtEncoder>,
    /// Token verification.
    decoder: Arc<JwtDecoder>,
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        credentials: Arc<CredentialStore>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            credentials,
            encoder,
            decoder,
        }
    }

    /// Verifies credentials and opens a session.
    ///
    /// A new login supersedes any refresh token issued before it.
    pub async fn login(&self, identifier: &str, password: &str) -> AppResult<LoginOutcome> {
        let account = self
            .credentials
            .find_by_identifier(identifier)
            .await?
            .ok_or_else(|| AppError::not_found("Account does not exist"))?;

        if !self.credentials.verify_password(&account, password) {
            warn!(account_id = %account.id, "Login failed: wrong password");
            return Err(AppError::unauthorized("Invalid account credentials"));
        }

        let tokens = self.encoder.issue_pair(account.id, &account.username)?;
        let accounts = self.credentials.accounts();
        accounts
            .set_refresh_token(account.id, Some(&token_digest(&tokens.refresh_token)))
            .await?;
        accounts.touch_last_login(account.id).await?;

        let account = accounts
            .find_by_id(account.id)
            .await?
            .ok_or_else(|| AppError::not_found("Account does not exist"))?;

        info!(account_id = %account.id, "Login successful");
        Ok(LoginOutcome {
            account: account.into(),
            tokens,
        })
    }

    /// Exchanges a refresh token for a new pair, invalidating the presented one.
    ///
    /// Only the most recently issued refresh token is accepted, and of two
    /// concurrent exchanges of the same token at most one succeeds.
    pub async fn refresh(&self, presented: &str) -> AppResult<TokenPair> {
        let claims = self.decoder.verify_refresh(presented)?;

        let account = self
            .credentials
            .find_by_id(claims.account_id())
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid refresh token"))?;

        let presented_digest = token_digest(presented);
        if account.refresh_token_hash.as_deref() != Some(presented_digest.as_str()) {
            warn!(account_id = %account.id, "Refresh token is expired or used");
            return Err(AppError::unauthorized("Refresh token is expired or used"));
        }

        let tokens = self.encoder.issue_pair(account.id, &account.username)?;
        let rotated = self
            .credentials
            .accounts()
            .rotate_refresh_token(
                account.id,
                &presented_digest,
                &token_digest(&tokens.refresh_token),
            )
            .await?;

        if !rotated {
            warn!(account_id = %account.id, "Refresh token lost a concurrent rotation");
            return Err(AppError::unauthorized("Refresh token is expired or used"));
        }

        info!(account_id = %account.id, "Session refreshed");
        Ok(tokens)
    }

    /// Ends the account's session by clearing its stored refresh token.
    pub async fn logout(&self, account_id: Uuid) -> AppResult<()> {
        self.credentials
            .accounts()
            .set_refresh_token(account_id, None)
            .await?;
        info!(account_id = %account_id, "Logged out");
        Ok(())
    }

    /// Resolves an access token to its account.
    pub async fn authenticate(&self, access_token: &str) -> AppResult<PublicAccount> {
        let claims = self
            .decoder
            .verify_access(access_token)
            .map_err(|_| AppError::unauthorized("Invalid access token"))?;

        self.credentials
            .find_by_id(claims.account_id())
            .await?
            .map(PublicAccount::from)
            .ok_or_else(|| AppError::unauthorized("Invalid access token"))
    }
}
