//! Ledger transaction record.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use facility_core::types::TransactionId;

/// An append-only ledger entry. Positive amounts are charges, negative
/// amounts are refunds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction id.
    pub id: TransactionId,
    /// When the transaction was recorded.
    pub timestamp: NaiveDateTime,
    /// Customer the amount was charged to or refunded to.
    pub customer: String,
    /// Signed amount.
    pub amount: f64,
}

impl Transaction {
    /// Create a transaction under a fresh id.
    pub fn new(timestamp: NaiveDateTime, customer: impl Into<String>, amount: f64) -> Self {
        Self {
            id: TransactionId::new(),
            timestamp,
            customer: customer.into(),
            amount,
        }
    }

    /// Whether this entry is a refund.
    pub fn is_refund(&self) -> bool {
        self.amount < 0.0
    }
}
