//! Transaction ledger repository.

use async_trait::async_trait;
use tokio::sync::RwLock;

use facility_core::result::AppResult;
use facility_core::traits::Repository;
use facility_core::types::{DateRange, TransactionId};
use facility_core::AppError;
use facility_entity::Transaction;

/// Append-only ledger of charges and refunds.
#[derive(Debug, Default)]
pub struct TransactionRepository {
    records: RwLock<Vec<Transaction>>,
}

impl TransactionRepository {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger entries optionally limited to one customer, with dates inside `range`.
    pub async fn find_filtered(
        &self,
        customer: Option<&str>,
        range: DateRange,
    ) -> AppResult<Vec<Transaction>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|t| customer.is_none_or(|c| t.customer == c))
            .filter(|t| range.contains(t.timestamp.date()))
            .cloned()
            .collect())
    }

    /// Net amount charged to `customer` over the whole ledger.
    pub async fn balance_of(&self, customer: &str) -> AppResult<f64> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|t| t.customer == customer)
            .map(|t| t.amount)
            .sum())
    }
}

#[async_trait]
impl Repository<Transaction, TransactionId> for TransactionRepository {
    async fn find_by_id(&self, id: &TransactionId) -> AppResult<Option<Transaction>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|t| t.id == *id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Transaction>> {
        Ok(self.records.read().await.clone())
    }

    async fn create(&self, entity: &Transaction) -> AppResult<Transaction> {
        let mut records = self.records.write().await;
        if records.iter().any(|t| t.id == entity.id) {
            return Err(AppError::conflict(format!(
                "Transaction {} already exists",
                entity.id
            )));
        }
        records.push(entity.clone());
        Ok(entity.clone())
    }

    async fn delete(&self, id: &TransactionId) -> AppResult<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|t| t.id != *id);
        Ok(records.len() < before)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.records.read().await.len() as u64)
    }
}
