//! User account repository.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use facility_core::result::AppResult;
use facility_core::traits::Repository;
use facility_core::types::round_cents;
use facility_core::AppError;
use facility_entity::{User, UserRole};

/// Stores user accounts keyed by login id.
#[derive(Debug, Default)]
pub struct UserRepository {
    records: RwLock<Vec<User>>,
}

impl UserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Users holding `role`.
    pub async fn find_by_role(&self, role: UserRole) -> AppResult<Vec<User>> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|u| u.role == role).cloned().collect())
    }

    /// Replace the stored account that shares `user`'s id.
    pub async fn update(&self, user: &User) -> AppResult<User> {
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| AppError::not_found("User not found"))?;
        *slot = user.clone();
        Ok(user.clone())
    }

    /// Add `delta` to a user's balance and return the new balance.
    ///
    /// The read and the write happen under one lock so concurrent charges and
    /// refunds never lose an update.
    pub async fn adjust_balance(&self, id: &str, delta: f64) -> AppResult<f64> {
        let mut records = self.records.write().await;
        let user = records
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found("User not found"))?;
        user.account_balance = round_cents(user.account_balance + delta);
        debug!(user_id = %id, delta = delta, balance = user.account_balance, "Balance adjusted");
        Ok(user.account_balance)
    }
}

#[async_trait]
impl Repository<User, String> for UserRepository {
    async fn find_by_id(&self, id: &String) -> AppResult<Option<User>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.records.read().await.clone())
    }

    async fn create(&self, entity: &User) -> AppResult<User> {
        let mut records = self.records.write().await;
        if records.iter().any(|u| u.id == entity.id) {
            return Err(AppError::conflict("User already exists"));
        }
        records.push(entity.clone());
        Ok(entity.clone())
    }

    async fn delete(&self, id: &String) -> AppResult<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|u| u.id != *id);
        Ok(records.len() < before)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.records.read().await.len() as u64)
    }
}
