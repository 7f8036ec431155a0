//! `accessToken` / `refreshToken` cookies.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use userhub_auth::jwt::TokenPair;

/// Cookie carrying the access token.
pub const ACCESS_COOKIE: &str = "accessToken";
/// Cookie carrying the refresh token.
pub const REFRESH_COOKIE: &str = "refreshToken";

/// Attributes shared by both token cookies.
#[derive(Debug, Clone, Copy)]
pub struct CookieSettings {
    secure: bool,
    access_max_age: time::Duration,
    refresh_max_age: time::Duration,
}

impl CookieSettings {
    /// Cookie lifetimes follow the token lifetimes.
    pub fn new(secure: bool, access_ttl: chrono::Duration, refresh_ttl: chrono::Duration) -> Self {
        Self {
            secure,
            access_max_age: time::Duration::seconds(access_ttl.num_seconds()),
            refresh_max_age: time::Duration::seconds(refresh_ttl.num_seconds()),
        }
    }

    fn build(&self, name: &'static str, value: String, max_age: time::Duration) -> Cookie<'static> {
        Cookie::build((name, value))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(max_age)
            .build()
    }

    /// Add both token cookies to the jar.
    pub fn set_tokens(&self, jar: CookieJar, tokens: &TokenPair) -> CookieJar {
        jar.add(self.build(
            ACCESS_COOKIE,
            tokens.access_token.clone(),
            self.access_max_age,
        ))
        .add(self.build(
            REFRESH_COOKIE,
            tokens.refresh_token.clone(),
            self.refresh_max_age,
        ))
    }

    /// Add removal cookies for both tokens, whether or not the request carried them.
    pub fn clear_tokens(&self, jar: CookieJar) -> CookieJar {
        let mut access = self.build(ACCESS_COOKIE, String::new(), time::Duration::ZERO);
        let mut refresh = self.build(REFRESH_COOKIE, String::new(), time::Duration::ZERO);
        access.make_removal();
        refresh.make_removal();
        jar.add(access).add(refresh)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn settings(secure: bool) -> CookieSettings {
        CookieSettings::new(secure, chrono::Duration::minutes(15), chrono::Duration::days(10))
    }

    fn pair() -> TokenPair {
        TokenPair {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            access_expires_at: Utc::now(),
            refresh_expires_at: Utc::now(),
        }
    }

    #[test]
    fn test_token_cookie_attributes() {
        let jar = settings(true).set_tokens(CookieJar::new(), &pair());

        let access = jar.get(ACCESS_COOKIE).unwrap();
        assert_eq!(access.value(), "access");
        assert_eq!(access.http_only(), Some(true));
        assert_eq!(access.secure(), Some(true));
        assert_eq!(access.same_site(), Some(SameSite::Lax));
        assert_eq!(access.path(), Some("/"));
        assert_eq!(access.max_age(), Some(time::Duration::minutes(15)));

        let refresh = jar.get(REFRESH_COOKIE).unwrap();
        assert_eq!(refresh.value(), "refresh");
        assert_eq!(refresh.max_age(), Some(time::Duration::days(10)));
    }

    #[test]
    fn test_insecure_cookies_for_local_development() {
        let jar = settings(false).set_tokens(CookieJar::new(), &pair());
        assert_eq!(jar.get(ACCESS_COOKIE).unwrap().secure(), Some(false));
    }

    #[test]
    fn test_clear_tokens_emits_expired_cookies() {
        let jar = settings(true).clear_tokens(CookieJar::new());
        let access = jar.get(ACCESS_COOKIE).unwrap();
        assert_eq!(access.value(), "");
        assert_eq!(access.max_age(), Some(time::Duration::ZERO));
    }
}
