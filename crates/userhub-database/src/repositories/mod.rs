//! Repository implementations for database operations.

pub mod account;

pub use account::AccountRepository;
