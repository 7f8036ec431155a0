//! # userhub-auth
//!
//! Authentication and session lifecycle for UserHub.
//!
//! ## Modules
//!
//! - `credential`: account creation, lookup, and password verification
//! - `jwt`: access/refresh token minting and verification
//! - `password`: Argon2id password hashing and policy enforcement
//! - `session`: login, refresh-token rotation, logout, and access-token authentication

pub mod credential;
pub mod jwt;
pub mod password;
pub mod session;

pub use credential::{CredentialStore, NewCredentials};
pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenClass, TokenError, TokenPair};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{LoginOutcome, SessionManager};
