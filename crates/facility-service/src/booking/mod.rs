//! Single-slot bookings: reserve, edit, cancel, and queries.

pub mod model;
pub mod service;

pub use model::{BookingReceipt, EditReceipt, EditRequest, ReservationFilter, ReserveRequest};
pub use service::BookingService;
