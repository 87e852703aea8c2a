//! Transaction ledger queries.

use std::sync::Arc;

use facility_core::traits::Repository;
use facility_core::types::DateRange;
use facility_core::{AppError, AppResult};
use facility_database::{TransactionRepository, UserRepository};
use facility_entity::Transaction;

/// Read access to charges and refunds.
#[derive(Debug, Clone)]
pub struct LedgerService {
    /// Transaction ledger.
    transaction_repo: Arc<TransactionRepository>,
    /// User repository.
    user_repo: Arc<UserRepository>,
}

impl LedgerService {
    /// Creates a new ledger service.
    pub fn new(transaction_repo: Arc<TransactionRepository>, user_repo: Arc<UserRepository>) -> Self {
        Self {
            transaction_repo,
            user_repo,
        }
    }

    /// Ledger entries dated strictly inside `range`, optionally for one customer.
    pub async fn list_transactions(
        &self,
        customer: Option<&str>,
        range: DateRange,
    ) -> AppResult<Vec<Transaction>> {
        if let Some(customer) = customer {
            self.user_repo
                .find_by_id(&customer.to_string())
                .await?
                .ok_or_else(|| AppError::not_found("User ID invalid"))?;
        }
        self.transaction_repo.find_filtered(customer, range).await
    }

    /// Net amount charged to `customer` over all time.
    pub async fn net_charges(&self, customer: &str) -> AppResult<f64> {
        self.transaction_repo.balance_of(customer).await
    }
}
