//! Token verification failures.

use thiserror::Error;

use userhub_core::error::AppError;

/// Why a presented token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Bad signature, malformed token, or wrong token class.
    #[error("Token is invalid")]
    Invalid,
    /// Signature is valid but the token is past its expiry.
    #[error("Token has expired")]
    Expired,
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        AppError::unauthorized(err.to_string())
    }
}
