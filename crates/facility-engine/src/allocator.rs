//! Shared catalog for concurrent callers.

use std::sync::Arc;

use chrono::NaiveDateTime;
use tokio::sync::{Mutex, MutexGuard};
use tracing::info;

use facility_entity::{Reservation, ResourceKind};

use crate::admission::{Admission, Candidate};
use crate::catalog::Catalog;
use crate::rejection::Rejection;

/// The resource catalog behind a Tokio mutex.
///
/// Admission reads and mutates unit state in one step, so every check runs
/// under the lock. Callers that must admit several blocks as a unit take the
/// guard with [`SlotAllocator::lock`] and hold it across the whole sequence.
#[derive(Debug, Clone)]
pub struct SlotAllocator {
    catalog: Arc<Mutex<Catalog>>,
}

impl SlotAllocator {
    /// Wrap an existing catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(Mutex::new(catalog)),
        }
    }

    /// An allocator over the standard fit-out.
    pub fn standard() -> Self {
        Self::new(Catalog::standard())
    }

    /// Exclusive access to the catalog.
    pub async fn lock(&self) -> MutexGuard<'_, Catalog> {
        self.catalog.lock().await
    }

    /// Admit a single candidate.
    pub async fn admit(
        &self,
        candidate: &Candidate<'_>,
        now: NaiveDateTime,
    ) -> Result<Admission, Rejection> {
        self.catalog.lock().await.admit(candidate, now)
    }

    /// Free a booked slot.
    pub async fn release(&self, kind: ResourceKind, customer: &str, timestamp: NaiveDateTime) -> bool {
        self.catalog.lock().await.release(kind, customer, timestamp)
    }

    /// Re-populate the catalog from stored reservations.
    pub async fn restore(&self, reservations: &[Reservation]) -> usize {
        let placed = self.catalog.lock().await.restore(reservations);
        info!(
            placed = placed,
            stored = reservations.len(),
            "Catalog restored from stored reservations"
        );
        placed
    }

    /// A copy of the current catalog state.
    pub async fn snapshot(&self) -> Catalog {
        self.catalog.lock().await.clone()
    }
}

impl Default for SlotAllocator {
    fn default() -> Self {
        Self::standard()
    }
}
