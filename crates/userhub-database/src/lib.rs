//! # userhub-database
//!
//! Account persistence for UserHub: the [`AccountStore`] trait, its
//! PostgreSQL implementation, an in-memory implementation, connection
//! pool management, and migrations.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryAccountStore;
pub use repositories::AccountRepository;
pub use store::{AccountStore, connect_store};
