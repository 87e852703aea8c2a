//! Runtime settings flags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use facility_core::AppError;

/// Boolean switches toggled by facility managers at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Setting {
    /// Whether client accounts may log in.
    ClientLoginsAllowed,
    /// Whether client accounts may add funds themselves.
    ClientAddingFundsAllowed,
}

impl Setting {
    /// All settings.
    pub const ALL: [Setting; 2] = [Self::ClientLoginsAllowed, Self::ClientAddingFundsAllowed];

    /// Stored name of the setting.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClientLoginsAllowed => "client_logins_allowed",
            Self::ClientAddingFundsAllowed => "client_adding_funds_allowed",
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Setting {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client_logins_allowed" => Ok(Self::ClientLoginsAllowed),
            "client_adding_funds_allowed" => Ok(Self::ClientAddingFundsAllowed),
            _ => Err(AppError::validation(
                "Setting must be one of \"client_logins_allowed\" or \"client_adding_funds_allowed\"",
            )),
        }
    }
}
