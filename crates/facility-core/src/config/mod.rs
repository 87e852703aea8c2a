//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field carries a serde default so that a missing file
//! still produces a usable configuration.

pub mod facility;
pub mod logging;
pub mod settings;

use serde::{Deserialize, Serialize};
use validator::Validate;

use self::facility::FacilityConfig;
use self::logging::LoggingConfig;
use self::settings::SettingsConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the merged TOML configuration files
/// (default.toml + environment overlay) and `FACILITY__*` variables.
#[derive(Debug, Clone, Default, Validate, Serialize, Deserialize)]
pub struct AppConfig {
    /// Facility identity and account bounds.
    #[serde(default)]
    #[validate(nested)]
    pub facility: FacilityConfig,
    /// Initial values of the runtime settings flags.
    #[serde(default)]
    pub settings: SettingsConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `FACILITY__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        tracing::debug!("Loading config from 'config/' (env: {})", env);
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("FACILITY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        app_config.check()?;
        tracing::debug!(
            facility = %app_config.facility.name,
            "Configuration loaded"
        );
        Ok(app_config)
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        let app_config: Self = config.try_deserialize()?;
        app_config.check()?;
        Ok(app_config)
    }

    /// Reject field values and bounds that cannot work together.
    fn check(&self) -> Result<(), AppError> {
        self.validate()
            .map_err(|e| AppError::configuration(format!("Invalid configuration: {e}")))?;
        if self.facility.min_funds_addition > self.facility.max_funds_addition {
            return Err(AppError::configuration(
                "min_funds_addition must not exceed max_funds_addition",
            ));
        }
        Ok(())
    }
}
