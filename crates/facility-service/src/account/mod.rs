//! User accounts and prepaid balances.

pub mod service;

pub use service::{AccountService, AddFundsRequest, AddUserRequest};
