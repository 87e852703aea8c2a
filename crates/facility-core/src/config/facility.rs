//! Facility identity and account configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Facility-wide configuration.
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
pub struct FacilityConfig {
    /// Name reported to cooperating facilities in hold receipts.
    #[serde(default = "default_name")]
    #[validate(length(min = 1, message = "Facility name is required"))]
    pub name: String,
    /// Smallest amount a customer may add to their balance in one request.
    #[serde(default = "default_min_funds")]
    #[validate(range(exclusive_min = 0.0))]
    pub min_funds_addition: f64,
    /// Largest amount a customer may add to their balance in one request.
    #[serde(default = "default_max_funds")]
    #[validate(range(exclusive_min = 0.0))]
    pub max_funds_addition: f64,
}

impl Default for FacilityConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            min_funds_addition: default_min_funds(),
            max_funds_addition: default_max_funds(),
        }
    }
}

fn default_name() -> String {
    "Team 1, Chicago, IL".to_string()
}

fn default_min_funds() -> f64 {
    1.0
}

fn default_max_funds() -> f64 {
    25_000.0
}
