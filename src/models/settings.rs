//! Persisted root-folder selection.

use serde::{Deserialize, Serialize};

/// Durable selection of which remote folder is the content root.
///
/// Persists across application restarts until explicitly cleared. Onboarding
/// is complete exactly when a root folder id is present.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootConfig {
    pub root_folder_id: Option<String>,
    pub root_folder_name: Option<String>,
}

impl RootConfig {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            root_folder_id: Some(id.into()),
            root_folder_name: Some(name.into()),
        }
    }

    /// True iff a root folder has been chosen.
    pub fn is_onboarded(&self) -> bool {
        self.root_folder_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_onboarded_iff_root_set() {
        assert!(!RootConfig::default().is_onboarded());
        assert!(RootConfig::new("abc", "My Folder").is_onboarded());
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = RootConfig::new("abc", "My Folder");
        let json = serde_json::to_string(&config).expect("serializable");
        let back: RootConfig = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(back, config);
    }
}
