use std::sync::Arc;

use crate::domain::UserSettings;
use crate::store::{Storage, SETTINGS_KEY};

/// Owner of the process-wide settings record.
///
/// Persistence failures never surface: a read or parse failure falls
/// back to defaults, a write failure leaves the in-memory record ahead
/// of the persisted one until the next successful write. Both are
/// logged.
pub struct SettingsStore {
    storage: Arc<dyn Storage>,
    settings: UserSettings,
}

impl SettingsStore {
    /// Read the persisted record, merging it over defaults. Called once
    /// at startup.
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let settings = match storage.get_item(SETTINGS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::error!(error = %e, "malformed settings record, using defaults");
                    UserSettings::default()
                }
            },
            Ok(None) => UserSettings::default(),
            Err(e) => {
                tracing::error!(error = %e, "failed to load settings, using defaults");
                UserSettings::default()
            }
        };

        Self { storage, settings }
    }

    pub fn settings(&self) -> &UserSettings {
        &self.settings
    }

    /// Apply one mutation to the record, then persist the whole record.
    pub fn update(&mut self, apply: impl FnOnce(&mut UserSettings)) {
        apply(&mut self.settings);
        self.persist();
    }

    /// Restore the hardcoded defaults and persist them.
    pub fn reset(&mut self) {
        self.settings = UserSettings::default();
        self.persist();
    }

    fn persist(&self) {
        match serde_json::to_string(&self.settings) {
            Ok(raw) => {
                if let Err(e) = self.storage.set_item(SETTINGS_KEY, &raw) {
                    tracing::error!(error = %e, "failed to persist settings");
                }
            }
            Err(e) => tracing::error!(error = %e, "failed to serialize settings"),
        }
    }
}
