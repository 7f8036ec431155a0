//! Account credentials: creation, lookup, and password verification.

pub mod store;

pub use store::{CredentialStore, NewCredentials};
