//! Persistence for custom permission presets.
//!
//! The preset manager only talks to the [`PresetStore`] trait. Two stores
//! ship with the service: [`MemoryPresetStore`] keeps presets for the life
//! of the process, [`JsonFilePresetStore`] writes them to a JSON file.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use parking_lot::Mutex;

use barflow_config::PresetStoreConfig;
use barflow_models::PermissionPreset;

/// Load/save collaborator for custom presets.
pub trait PresetStore: Send + Sync {
    /// All custom presets previously saved.
    fn load(&self) -> anyhow::Result<Vec<PermissionPreset>>;

    /// Replaces the stored presets with `presets`.
    fn save(&self, presets: &[PermissionPreset]) -> anyhow::Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryPresetStore {
    presets: Mutex<Vec<PermissionPreset>>,
}

impl MemoryPresetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts out holding `presets`.
    pub fn seeded(presets: Vec<PermissionPreset>) -> Self {
        Self {
            presets: Mutex::new(presets),
        }
    }
}

impl PresetStore for MemoryPresetStore {
    fn load(&self) -> anyhow::Result<Vec<PermissionPreset>> {
        Ok(self.presets.lock().clone())
    }

    fn save(&self, presets: &[PermissionPreset]) -> anyhow::Result<()> {
        *self.presets.lock() = presets.to_vec();
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct JsonFilePresetStore {
    path: PathBuf,
}

impl JsonFilePresetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PresetStore for JsonFilePresetStore {
    fn load(&self) -> anyhow::Result<Vec<PermissionPreset>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read preset file {}", self.path.display()))?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse preset file {}", self.path.display()))
    }

    fn save(&self, presets: &[PermissionPreset]) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create preset directory {}", parent.display())
            })?;
        }

        let body = serde_json::to_string_pretty(presets).context("Failed to encode presets")?;

        // Write next to the target and rename so readers never see half a file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body)
            .with_context(|| format!("Failed to write preset file {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace preset file {}", self.path.display()))?;

        Ok(())
    }
}

/// Picks the store described by `config`.
pub fn store_from_config(config: &PresetStoreConfig) -> Arc<dyn PresetStore> {
    match &config.store_path {
        Some(path) => Arc::new(JsonFilePresetStore::new(path.clone())),
        None => Arc::new(MemoryPresetStore::new()),
    }
}
