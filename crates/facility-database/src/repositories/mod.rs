//! Repository implementations for all facility records.

pub mod reservation;
pub mod settings;
pub mod transaction;
pub mod user;

pub use reservation::ReservationRepository;
pub use settings::SettingsRepository;
pub use transaction::TransactionRepository;
pub use user::UserRepository;
