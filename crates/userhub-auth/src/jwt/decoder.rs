//! JWT token verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use userhub_core::config::AuthConfig;

use super::claims::{Claims, TokenClass};
use super::error::TokenError;

/// Verifies access and refresh tokens against their own secrets.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC key for access tokens.
    access_key: DecodingKey,
    /// HMAC key for refresh tokens.
    refresh_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            access_key: DecodingKey::from_secret(config.access_token_secret.as_bytes()),
            refresh_key: DecodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            validation,
        }
    }

    /// Verifies signature, expiry, and class of `token`.
    pub fn verify(&self, token: &str, class: TokenClass) -> Result<Claims, TokenError> {
        let key = match class {
            TokenClass::Access => &self.access_key,
            TokenClass::Refresh => &self.refresh_key,
        };

        let claims = decode::<Claims>(token, key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })?
            .claims;

        if claims.token_type != class {
            return Err(TokenError::Invalid);
        }
        Ok(claims)
    }

    /// Verifies an access token.
    pub fn verify_access(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify(token, TokenClass::Access)
    }

    /// Verifies a refresh token.
    pub fn verify_refresh(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify(token, TokenClass::Refresh)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use uuid::Uuid;

    use super::*;
    use crate::jwt::JwtEncoder;

    fn config() -> AuthConfig {
        AuthConfig {
            access_token_secret: "access-secret".to_string(),
            refresh_token_secret: "refresh-secret".to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_roundtrip_carries_account_id() {
        let config = config();
        let id = Uuid::new_v4();
        let (token, _) = JwtEncoder::new(&config)
            .issue_access_token(id, "alice")
            .unwrap();

        let claims = JwtDecoder::new(&config).verify_access(&token).unwrap();
        assert_eq!(claims.account_id(), id);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.token_type, TokenClass::Access);
    }

    #[test]
    fn test_wrong_class_is_invalid() {
        let config = config();
        let pair = JwtEncoder::new(&config)
            .issue_pair(Uuid::new_v4(), "alice")
            .unwrap();
        let decoder = JwtDecoder::new(&config);

        assert_eq!(
            decoder.verify_refresh(&pair.access_token).unwrap_err(),
            TokenError::Invalid
        );
        assert_eq!(
            decoder.verify_access(&pair.refresh_token).unwrap_err(),
            TokenError::Invalid
        );
    }

    #[test]
    fn test_tampered_and_garbage_tokens_are_invalid() {
        let config = config();
        let (token, _) = JwtEncoder::new(&config)
            .issue_access_token(Uuid::new_v4(), "alice")
            .unwrap();
        let decoder = JwtDecoder::new(&config);

        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        parts[1] = format!("x{}", &parts[1][1..]);
        let tampered = parts.join(".");
        assert_eq!(decoder.verify_access(&tampered).unwrap_err(), TokenError::Invalid);
        assert_eq!(decoder.verify_access("not-a-jwt").unwrap_err(), TokenError::Invalid);
    }

    #[test]
    fn test_foreign_secret_is_invalid() {
        let (token, _) = JwtEncoder::new(&AuthConfig {
            access_token_secret: "someone-else".to_string(),
            refresh_token_secret: "refresh-secret".to_string(),
            ..AuthConfig::default()
        })
        .issue_access_token(Uuid::new_v4(), "alice")
        .unwrap();

        assert_eq!(
            JwtDecoder::new(&config()).verify_access(&token).unwrap_err(),
            TokenError::Invalid
        );
    }

    #[test]
    fn test_expired_token_is_expired() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            username: "alice".to_string(),
            iat: now - 3600,
            exp: now - 600,
            jti: Uuid::new_v4(),
            token_type: TokenClass::Access,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"access-secret"),
        )
        .unwrap();

        assert_eq!(
            JwtDecoder::new(&config()).verify_access(&token).unwrap_err(),
            TokenError::Expired
        );
    }
}
