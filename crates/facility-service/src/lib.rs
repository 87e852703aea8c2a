//! # facility-service
//!
//! Use-case layer for the facility reservation system. Each service
//! orchestrates the record repositories and the slot allocator to implement
//! one family of operations: bookings, remote holds, accounts, settings, and
//! the transaction ledger.
//!
//! Services follow constructor injection: all dependencies are provided at
//! construction time via `Arc` references. [`ServiceContext`] wires a full
//! set from configuration.

pub mod account;
pub mod booking;
pub mod context;
pub mod hold;
pub mod ledger;
pub mod settings;

pub use account::{AccountService, AddFundsRequest, AddUserRequest};
pub use booking::{
    BookingReceipt, BookingService, EditReceipt, EditRequest, ReservationFilter, ReserveRequest,
};
pub use context::{RequestContext, ServiceContext};
pub use hold::{HoldReceipt, HoldRequest, HoldService};
pub use ledger::LedgerService;
pub use settings::SettingsService;
