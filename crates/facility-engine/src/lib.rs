//! # facility-engine
//!
//! The resource-allocation core of the facility reservation system.
//!
//! ## Modules
//!
//! - `catalog`: the fixed set of resource units and their booked slots
//! - `slot`: 30-minute slot arithmetic, working hours, and the booking horizon
//! - `admission`: the ordered admission rules that commit a slot to a unit
//! - `limits`: per-customer weekly-day and concurrent-machine limits
//! - `pricing`: booking cost with advance discount and cancellation refunds
//! - `hold`: translation of remote hold time ranges into slot checks
//! - `allocator`: the catalog behind a lock for concurrent callers
//!
//! Everything except `allocator` is synchronous and free of I/O. Functions
//! that depend on the current time take it as an explicit `now` argument.

pub mod admission;
pub mod allocator;
pub mod catalog;
pub mod hold;
pub mod limits;
pub mod pricing;
pub mod rejection;
pub mod slot;

pub use admission::{Admission, Candidate};
pub use allocator::SlotAllocator;
pub use catalog::{Catalog, Occupancy, ResourceUnit};
pub use hold::{strip_unit_suffix, translate_hold};
pub use limits::limit_exceeded;
pub use pricing::{calculate_cost, calculate_refund};
pub use rejection::Rejection;
