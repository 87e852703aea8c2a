//! Booking requests and receipts.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use facility_core::types::{DateRange, ReservationId};

/// Request to book one slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveRequest {
    /// Catalog name of the resource.
    pub resource: String,
    /// Customer the slot is for.
    pub customer: String,
    /// Slot start.
    pub timestamp: NaiveDateTime,
}

/// Request to move an existing reservation to another resource or slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditRequest {
    /// Reservation being changed.
    pub serial_num: ReservationId,
    /// Catalog name of the new resource.
    pub resource: String,
    /// Customer the reservation belongs to.
    pub customer: String,
    /// New slot start.
    pub timestamp: NaiveDateTime,
}

/// Result of a successful booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingReceipt {
    /// Serial number of the new reservation.
    pub serial_num: ReservationId,
    /// Amount charged.
    pub cost: f64,
    /// Customer balance after the charge.
    pub balance: f64,
}

/// Result of a successful edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditReceipt {
    /// Serial number, unchanged by the edit.
    pub serial_num: ReservationId,
    /// Cost of the new slot.
    pub cost: f64,
    /// Refund for the old slot.
    pub refund: f64,
    /// `cost - refund`; negative when the customer is owed money.
    pub net_amount: f64,
}

impl EditReceipt {
    /// Whether the edit left the customer with money back.
    pub fn is_refund(&self) -> bool {
        self.net_amount < 0.0
    }
}

/// Filter for reservation listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationFilter {
    /// Restrict to one customer.
    #[serde(default)]
    pub customer: Option<String>,
    /// Restrict to dates strictly inside this range.
    #[serde(default)]
    pub range: DateRange,
}
