//! Reservation record.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use facility_core::types::ReservationId;

use crate::resource::ResourceKind;

/// A booked 30-minute slot of one resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    /// Serial number handed to the customer.
    pub serial_num: ReservationId,
    /// Start of the slot (facility-local, :00 or :30).
    pub timestamp: NaiveDateTime,
    /// Reserved resource type.
    pub resource: ResourceKind,
    /// Customer the slot is booked for.
    pub customer: String,
    /// Account that made the booking (facility manager, remote facility, or the customer).
    pub reserver: String,
    /// Amount charged for the slot.
    pub cost: f64,
}

impl Reservation {
    /// Create a reservation under a fresh serial number.
    pub fn new(
        timestamp: NaiveDateTime,
        resource: ResourceKind,
        customer: impl Into<String>,
        reserver: impl Into<String>,
        cost: f64,
    ) -> Self {
        Self {
            serial_num: ReservationId::new(),
            timestamp,
            resource,
            customer: customer.into(),
            reserver: reserver.into(),
            cost,
        }
    }

    /// Whether the booking was placed by someone other than the customer.
    pub fn is_proxy_booking(&self) -> bool {
        self.customer != self.reserver
    }
}
