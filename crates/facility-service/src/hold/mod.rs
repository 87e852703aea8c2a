//! Holds placed on behalf of cooperating facilities.

pub mod service;

pub use service::{HoldReceipt, HoldRequest, HoldService};
