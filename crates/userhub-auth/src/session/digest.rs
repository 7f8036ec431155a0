//! Refresh-token digests for server-side storage.

use sha2::{Digest, Sha256};

/// SHA-256 hex digest of a token.
pub fn token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_stable_hex() {
        let a = token_digest("token");
        assert_eq!(a.len(), 64);
        assert_eq!(a, token_digest("token"));
        assert_ne!(a, token_digest("token2"));
    }
}
