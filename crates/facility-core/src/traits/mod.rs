//! Core traits defined in `facility-core` and implemented by other crates.

pub mod clock;
pub mod repository;

pub use clock::{Clock, FixedClock, SystemClock};
pub use repository::Repository;
