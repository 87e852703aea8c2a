//! Settings repository.

use std::collections::BTreeMap;

use tokio::sync::RwLock;
use tracing::info;

use facility_core::result::AppResult;
use facility_entity::Setting;

/// Stores the runtime settings flags.
#[derive(Debug, Default)]
pub struct SettingsRepository {
    values: RwLock<BTreeMap<Setting, bool>>,
}

impl SettingsRepository {
    /// Create an empty settings store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `setting`, if it has ever been set.
    pub async fn get(&self, setting: Setting) -> AppResult<Option<bool>> {
        Ok(self.values.read().await.get(&setting).copied())
    }

    /// Store `value` for `setting`.
    pub async fn set(&self, setting: Setting, value: bool) -> AppResult<()> {
        self.values.write().await.insert(setting, value);
        info!(setting = %setting, value = value, "Setting updated");
        Ok(())
    }

    /// Every stored setting.
    pub async fn find_all(&self) -> AppResult<Vec<(Setting, bool)>> {
        let values = self.values.read().await;
        Ok(values.iter().map(|(k, v)| (*k, *v)).collect())
    }
}
