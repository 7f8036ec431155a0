//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use userhub_core::error::AppError;

/// Login request body. Either `username` or `email` identifies the account.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    pub username: Option<String>,
    /// Email.
    pub email: Option<String>,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginRequest {
    /// The identifier to look up, preferring `email` when both are sent.
    pub fn identifier(&self) -> Result<&str, AppError> {
        [self.email.as_deref(), self.username.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .ok_or_else(|| AppError::validation("Username or email is required"))
    }
}

/// Token refresh request body, used when no `refreshToken` cookie is sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: Option<String>,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,
    /// New password.
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// Update account request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    /// Display name.
    #[validate(length(max = 100, message = "Display name is too long"))]
    pub display_name: Option<String>,
    /// Email; format is checked after trimming by the account service.
    pub email: Option<String>,
}
