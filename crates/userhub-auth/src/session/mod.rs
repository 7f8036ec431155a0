//! Session lifecycle: login, refresh-token rotation, logout.

pub mod digest;
pub mod manager;

pub use digest::token_digest;
pub use manager::{LoginOutcome, SessionManager};
