//! Reservation repository.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use facility_core::result::AppResult;
use facility_core::traits::Repository;
use facility_core::types::{DateRange, ReservationId};
use facility_core::AppError;
use facility_entity::Reservation;

/// Stores reservations keyed by serial number.
#[derive(Debug, Default)]
pub struct ReservationRepository {
    records: RwLock<Vec<Reservation>>,
}

impl ReservationRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// All reservations booked for `customer`.
    pub async fn find_by_customer(&self, customer: &str) -> AppResult<Vec<Reservation>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.customer == customer)
            .cloned()
            .collect())
    }

    /// Reservations whose reserver satisfies `is_match`.
    pub async fn find_by_reserver(
        &self,
        is_match: impl Fn(&str) -> bool + Send,
    ) -> AppResult<Vec<Reservation>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| is_match(&r.reserver))
            .cloned()
            .collect())
    }

    /// Reservations optionally limited to one customer, with dates inside `range`.
    pub async fn find_filtered(
        &self,
        customer: Option<&str>,
        range: DateRange,
    ) -> AppResult<Vec<Reservation>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| customer.is_none_or(|c| r.customer == c))
            .filter(|r| range.contains(r.timestamp.date()))
            .cloned()
            .collect())
    }

    /// Replace the stored reservation that shares `reservation`'s serial number.
    pub async fn update(&self, reservation: &Reservation) -> AppResult<Reservation> {
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|r| r.serial_num == reservation.serial_num)
            .ok_or_else(|| AppError::not_found("Reservation not found"))?;
        *slot = reservation.clone();
        debug!(serial_num = %reservation.serial_num, "Reservation updated");
        Ok(reservation.clone())
    }
}

#[async_trait]
impl Repository<Reservation, ReservationId> for ReservationRepository {
    async fn find_by_id(&self, id: &ReservationId) -> AppResult<Option<Reservation>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.serial_num == *id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Reservation>> {
        Ok(self.records.read().await.clone())
    }

    async fn create(&self, entity: &Reservation) -> AppResult<Reservation> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.serial_num == entity.serial_num) {
            return Err(AppError::conflict(format!(
                "Reservation {} already exists",
                entity.serial_num
            )));
        }
        records.push(entity.clone());
        debug!(serial_num = %entity.serial_num, customer = %entity.customer, "Reservation stored");
        Ok(entity.clone())
    }

    async fn delete(&self, id: &ReservationId) -> AppResult<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.serial_num != *id);
        Ok(records.len() < before)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.records.read().await.len() as u64)
    }
}
