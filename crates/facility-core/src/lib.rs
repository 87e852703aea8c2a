//! # facility-core
//!
//! Core crate for the facility reservation system. Contains configuration
//! schemas, typed identifiers, the clock and repository traits, logging
//! setup, and the unified error system.
//!
//! This crate has **no** internal dependencies on other facility crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind, ErrorPayload};
pub use result::AppResult;
