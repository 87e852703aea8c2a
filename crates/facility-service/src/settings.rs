//! Runtime settings flags.

use std::sync::Arc;

use tracing::info;

use facility_core::config::settings::SettingsConfig;
use facility_core::AppResult;
use facility_database::SettingsRepository;
use facility_entity::Setting;

/// Reads and writes the facility's runtime switches.
#[derive(Debug, Clone)]
pub struct SettingsService {
    /// Settings repository.
    settings_repo: Arc<SettingsRepository>,
    /// Values used when a flag has never been stored.
    defaults: SettingsConfig,
}

impl SettingsService {
    /// Creates a new settings service.
    pub fn new(settings_repo: Arc<SettingsRepository>, defaults: SettingsConfig) -> Self {
        Self {
            settings_repo,
            defaults,
        }
    }

    fn default_for(&self, setting: Setting) -> bool {
        match setting {
            Setting::ClientLoginsAllowed => self.defaults.client_logins_allowed,
            Setting::ClientAddingFundsAllowed => self.defaults.client_adding_funds_allowed,
        }
    }

    /// Write the configured start-up value of every flag.
    pub async fn seed_defaults(&self) -> AppResult<()> {
        for setting in Setting::ALL {
            self.settings_repo
                .set(setting, self.default_for(setting))
                .await?;
        }
        Ok(())
    }

    /// Current value of `setting`.
    pub async fn value(&self, setting: Setting) -> AppResult<bool> {
        let stored = self.settings_repo.get(setting).await?;
        Ok(stored.unwrap_or_else(|| self.default_for(setting)))
    }

    /// Current value of the setting called `name`.
    pub async fn get(&self, name: &str) -> AppResult<bool> {
        let setting: Setting = name.parse()?;
        self.value(setting).await
    }

    /// Change the setting called `name`.
    pub async fn set(&self, name: &str, value: bool) -> AppResult<()> {
        let setting: Setting = name.parse()?;
        self.settings_repo.set(setting, value).await?;
        info!(setting = %setting, value = value, "Facility setting changed");
        Ok(())
    }

    /// Every flag with its current value.
    pub async fn list(&self) -> AppResult<Vec<(Setting, bool)>> {
        let mut values = Vec::with_capacity(Setting::ALL.len());
        for setting in Setting::ALL {
            values.push((setting, self.value(setting).await?));
        }
        Ok(values)
    }
}
