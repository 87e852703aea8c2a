//! # facility-entity
//!
//! Domain records for the facility reservation system. Every struct in this
//! crate represents a stored record or a domain value object; all of them
//! derive `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod reservation;
pub mod resource;
pub mod setting;
pub mod transaction;
pub mod user;

pub use reservation::Reservation;
pub use resource::ResourceKind;
pub use setting::Setting;
pub use transaction::Transaction;
pub use user::{User, UserRole};
