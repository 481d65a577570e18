//! Root-folder settings persistence.
//!
//! The chosen content root survives reloads via browser local storage. The
//! store is behind a small trait so settings logic is testable off-browser.

use crate::config::SETTINGS_STORAGE_KEY;
use crate::models::RootConfig;
use crate::utils::dom;

/// Where the root-folder choice is persisted.
pub trait SettingsStore {
    /// The persisted choice, if any. Unreadable or malformed data is treated
    /// as absent rather than surfaced as an error.
    fn load(&self) -> Option<RootConfig>;
    fn save(&self, config: &RootConfig);
    fn clear(&self);
}

/// Browser local-storage backing, keyed by [`SETTINGS_STORAGE_KEY`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageSettings;

impl SettingsStore for LocalStorageSettings {
    fn load(&self) -> Option<RootConfig> {
        let raw = dom::local_storage()?.get_item(SETTINGS_STORAGE_KEY).ok()??;
        match serde_json::from_str(&raw) {
            Ok(config) => Some(config),
            Err(err) => {
                leptos::logging::warn!("discarding unreadable settings: {err}");
                None
            }
        }
    }

    fn save(&self, config: &RootConfig) {
        let Some(storage) = dom::local_storage() else {
            return;
        };
        if let Ok(raw) = serde_json::to_string(config) {
            let _ = storage.set_item(SETTINGS_STORAGE_KEY, &raw);
        }
    }

    fn clear(&self) {
        if let Some(storage) = dom::local_storage() {
            let _ = storage.remove_item(SETTINGS_STORAGE_KEY);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::memory::MemorySettings;
    use super::*;

    #[test]
    fn test_round_trip_and_clear() {
        let store = MemorySettings::default();
        assert!(store.load().is_none());

        let config = RootConfig::new("folder-1".to_string(), "My-CMS-Folder".to_string());
        store.save(&config);
        assert_eq!(store.load(), Some(config));

        store.clear();
        assert!(store.load().is_none());
    }
}
