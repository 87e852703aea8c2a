//! # facility-database
//!
//! Record storage for the facility reservation system. Each repository keeps
//! its records in memory behind a `tokio::sync::RwLock` and preserves
//! insertion order, which is the order list queries return.

pub mod repositories;

pub use repositories::{
    ReservationRepository, SettingsRepository, TransactionRepository, UserRepository,
};
