//! Initial values for the runtime settings flags.

use serde::{Deserialize, Serialize};

/// Start-up values written into the settings repository. Facility managers
/// can flip either flag at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Whether client accounts may log in.
    #[serde(default = "default_true")]
    pub client_logins_allowed: bool,
    /// Whether client accounts may add funds themselves.
    #[serde(default = "default_true")]
    pub client_adding_funds_allowed: bool,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            client_logins_allowed: true,
            client_adding_funds_allowed: true,
        }
    }
}

fn default_true() -> bool {
    true
}
