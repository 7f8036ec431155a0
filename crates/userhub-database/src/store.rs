//! The account store abstraction shared by the PostgreSQL and in-memory backends.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use userhub_core::config::{DatabaseBackend, DatabaseConfig};
use userhub_core::result::AppResult;
use userhub_entity::account::{Account, CreateAccount, UpdateAccount};

use crate::connection::DatabasePool;
use crate::memory::MemoryAccountStore;
use crate::migration::run_migrations;
use crate::repositories::AccountRepository;

/// Persistence operations on accounts.
///
/// Implementations must enforce username/email uniqueness atomically with
/// the insert, and must implement [`AccountStore::rotate_refresh_token`]
/// as a single compare-and-replace.
#[async_trait]
pub trait AccountStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new account. Fails with `Conflict` if the username or email is taken.
    async fn insert(&self, data: &CreateAccount) -> AppResult<Account>;

    /// Find an account by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>>;

    /// Find an account by username (case-insensitive).
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>>;

    /// Find an account by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// List accounts, newest first.
    async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<Account>>;

    /// Update profile fields. `None` fields are left unchanged.
    async fn update_profile(&self, data: &UpdateAccount) -> AppResult<Account>;

    /// Replace the stored password hash.
    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<()>;

    /// Unconditionally set (or clear) the stored refresh-token digest.
    async fn set_refresh_token(&self, id: Uuid, token_hash: Option<&str>) -> AppResult<()>;

    /// Replace the stored refresh-token digest only if it currently equals `expected`.
    ///
    /// Returns `false` when the stored value differs (already rotated or cleared).
    async fn rotate_refresh_token(
        &self,
        id: Uuid,
        expected: &str,
        replacement: &str,
    ) -> AppResult<bool>;

    /// Stamp the last successful login time.
    async fn touch_last_login(&self, id: Uuid) -> AppResult<()>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<()>;
}

/// Build the configured account store, running migrations for PostgreSQL.
pub async fn connect_store(config: &DatabaseConfig) -> AppResult<Arc<dyn AccountStore>> {
    match config.backend {
        DatabaseBackend::Postgres => {
            let pool = DatabasePool::connect(config).await?;
            run_migrations(pool.pool()).await?;
            Ok(Arc::new(AccountRepository::new(pool.into_pool())))
        }
        DatabaseBackend::Memory => {
            info!("Using in-memory account store; data will not survive a restart");
            Ok(Arc::new(MemoryAccountStore::new()))
        }
    }
}
