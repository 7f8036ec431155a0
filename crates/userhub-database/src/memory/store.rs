//! `AccountStore` over a `HashMap` guarded by a tokio `RwLock`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use userhub_core::error::AppError;
use userhub_core::result::AppResult;
use userhub_entity::account::{
    Account, CreateAccount, UpdateAccount, normalize_email, normalize_username,
};

use crate::store::AccountStore;

/// In-memory account store.
///
/// Every check-then-write runs under a single write guard.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<HashMap<Uuid, Account>>,
}

impl MemoryAccountStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// Whether the store holds no accounts.
    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

fn missing(id: Uuid) -> AppError {
    AppError::not_found(format!("Account {id} not found"))
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn insert(&self, data: &CreateAccount) -> AppResult<Account> {
        let username = normalize_username(&data.username);
        let email = normalize_email(&data.email);

        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|a| a.username == username) {
            return Err(AppError::conflict("Username is already taken"));
        }
        if accounts.values().any(|a| a.email == email) {
            return Err(AppError::conflict("Email is already in use"));
        }

        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4(),
            username,
            email,
            display_name: data.display_name.clone(),
            avatar_url: data.avatar_url.clone(),
            password_hash: data.password_hash.clone(),
            refresh_token_hash: None,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        };
        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        let username = normalize_username(username);
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let email = normalize_email(email);
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<Account>> {
        let mut all: Vec<Account> = self.accounts.read().await.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn update_profile(&self, data: &UpdateAccount) -> AppResult<Account> {
        let mut accounts = self.accounts.write().await;

        let email = data.email.as_deref().map(normalize_email);
        if let Some(ref email) = email
            && accounts.values().any(|a| a.id != data.id && &a.email == email)
        {
            return Err(AppError::conflict("Email is already in use"));
        }

        let account = accounts.get_mut(&data.id).ok_or_else(|| missing(data.id))?;
        if let Some(email) = email {
            account.email = email;
        }
        if let Some(ref display_name) = data.display_name {
            account.display_name = Some(display_name.clone());
        }
        account.updated_at = Utc::now();
        Ok(account.clone())
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(&id).ok_or_else(|| missing(id))?;
        account.password_hash = password_hash.to_string();
        account.updated_at = Utc::now();
        Ok(())
    }

    async fn set_refresh_token(&self, id: Uuid, token_hash: Option<&str>) -> AppResult<()> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(&id).ok_or_else(|| missing(id))?;
        account.refresh_token_hash = token_hash.map(str::to_string);
        account.updated_at = Utc::now();
        Ok(())
    }

    async fn rotate_refresh_token(
        &self,
        id: Uuid,
        expected: &str,
        replacement: &str,
    ) -> AppResult<bool> {
        let mut accounts = self.accounts.write().await;
        let Some(account) = accounts.get_mut(&id) else {
            return Ok(false);
        };
        if account.refresh_token_hash.as_deref() != Some(expected) {
            return Ok(false);
        }
        account.refresh_token_hash = Some(replacement.to_string());
        account.updated_at = Utc::now();
        Ok(true)
    }

    async fn touch_last_login(&self, id: Uuid) -> AppResult<()> {
        if let Some(account) = self.accounts.write().await.get_mut(&id) {
            account.last_login_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }
}
