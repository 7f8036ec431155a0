//! Password policy enforcement for new passwords.

use userhub_core::config::AuthConfig;
use userhub_core::error::AppError;

/// Upper bound on password length, in characters.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    min_length: usize,
    /// Minimum zxcvbn score; 0 skips the check.
    min_score: u8,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            min_score: config.password_min_score,
        }
    }

    /// Validates a password against all configured policies.
    ///
    /// Returns the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.trim().is_empty() {
            return Err(AppError::validation("Password is required"));
        }

        let length = password.chars().count();
        if length < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }
        if length > MAX_PASSWORD_LENGTH {
            return Err(AppError::validation(format!(
                "Password must be at most {MAX_PASSWORD_LENGTH} characters long"
            )));
        }

        if self.min_score > 0 {
            let estimate = zxcvbn::zxcvbn(password, &[]);
            if (estimate.score() as u8) < self.min_score {
                return Err(AppError::validation(
                    "Password is too weak. Please use a stronger password with more entropy.",
                ));
            }
        }

        Ok(())
    }

    /// Validates that a new password differs from the old one.
    pub fn validate_not_same(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if old_password == new_password {
            return Err(AppError::validation(
                "New password must be different from the current password",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use userhub_core::error::ErrorKind;

    use super::*;

    fn validator(min_score: u8) -> PasswordValidator {
        PasswordValidator::new(&AuthConfig {
            password_min_score: min_score,
            ..AuthConfig::default()
        })
    }

    #[test]
    fn test_default_policy_is_length_only() {
        let v = validator(0);
        assert!(v.validate("Secret1!").is_ok());
        assert!(v.validate("password").is_ok());

        let err = v.validate("short").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(v.validate("        ").is_err());
        assert!(v.validate(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_entropy_floor_rejects_common_passwords() {
        let v = validator(3);
        assert!(v.validate("password").is_err());
        assert!(v.validate("correct-horse-battery-staple-42").is_ok());
    }

    #[test]
    fn test_new_password_must_differ() {
        let v = validator(0);
        assert!(v.validate_not_same("Secret1!", "Secret1!").is_err());
        assert!(v.validate_not_same("Secret1!", "Secret2!").is_ok());
    }
}
