//! Storage configuration for custom permission presets.
//!
//! Custom presets live in memory by default and vanish with the process.
//! Setting `PRESET_STORE_PATH` switches to a JSON file that is read at
//! startup and rewritten after every preset mutation.

use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PresetStoreConfig {
    /// JSON file holding custom presets. `None` keeps them in memory only.
    pub store_path: Option<PathBuf>,
}

impl PresetStoreConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            store_path: env::var("PRESET_STORE_PATH")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.store_path.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_in_memory() {
        let config = PresetStoreConfig::default();
        assert_eq!(config.store_path, None);
        assert!(!config.is_persistent());
    }

    #[test]
    fn test_path_makes_it_persistent() {
        let config = PresetStoreConfig {
            store_path: Some(PathBuf::from("/var/lib/barflow/presets.json")),
        };
        assert!(config.is_persistent());
    }
}
