//! User account record and roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use facility_core::AppError;

/// Roles a facility account can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    /// Staff member running the facility.
    #[serde(rename = "facility manager")]
    FacilityManager,
    /// Paying customer.
    #[serde(rename = "client")]
    Client,
    /// Manager of a cooperating facility placing holds on its clients' behalf.
    #[serde(rename = "remote facility manager")]
    RemoteFacilityManager,
}

impl UserRole {
    /// Return the role as stored and displayed.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FacilityManager => "facility manager",
            Self::Client => "client",
            Self::RemoteFacilityManager => "remote facility manager",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "facility manager" => Ok(Self::FacilityManager),
            "client" => Ok(Self::Client),
            "remote facility manager" => Ok(Self::RemoteFacilityManager),
            _ => Err(AppError::validation(
                "User must be one of facility manager, client or remote facility manager",
            )),
        }
    }
}

/// A facility account. Credentials live with the authentication layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Login name, also used as the customer identifier on reservations.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Prepaid balance.
    pub account_balance: f64,
    /// Whether the account may make reservations.
    pub activation: bool,
    /// Account role.
    pub role: UserRole,
}

impl User {
    /// Create an active account with an empty balance.
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            account_balance: 0.0,
            activation: true,
            role,
        }
    }

    /// Whether the account can cover `amount`.
    pub fn can_afford(&self, amount: f64) -> bool {
        self.account_balance >= amount
    }
}
