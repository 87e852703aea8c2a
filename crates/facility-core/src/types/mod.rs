//! Core type definitions used across the facility workspace.

pub mod filter;
pub mod id;
pub mod money;

pub use filter::DateRange;
pub use id::*;
pub use money::round_cents;
