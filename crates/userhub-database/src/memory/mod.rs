//! In-process account storage for tests and single-node development.

pub mod store;

pub use store::MemoryAccountStore;
