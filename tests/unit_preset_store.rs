use std::sync::Arc;

use barflow::modules::permissions::{
    JsonFilePresetStore, MemoryPresetStore, PresetManager, PresetStore,
};
use barflow_models::{
    EmployeeRole, ModulePermission, ModulePermissions, PermissionPreset, PresetId, SystemModule,
    UpdatePresetDto,
};
use chrono::Utc;

struct BrokenStore;

impl PresetStore for BrokenStore {
    fn load(&self) -> anyhow::Result<Vec<PermissionPreset>> {
        Ok(Vec::new())
    }

    fn save(&self, _presets: &[PermissionPreset]) -> anyhow::Result<()> {
        anyhow::bail!("disk full")
    }
}

fn stored_preset(id: &str, is_default: bool) -> PermissionPreset {
    let now = Utc::now();
    PermissionPreset {
        id: PresetId::from(id),
        name: format!("Stored {id}"),
        description: String::new(),
        base_role: EmployeeRole::Waiter,
        permissions: ModulePermissions::new(),
        is_default,
        is_customizable: true,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn test_file_store_restores_presets_into_fresh_manager() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("presets.json");

    let created = {
        let manager =
            PresetManager::with_store(Arc::new(JsonFilePresetStore::new(&path))).unwrap();
        let keep = manager.create_custom_preset(
            "Closing shift",
            "Reads reports at close",
            EmployeeRole::Waiter,
            ModulePermissions::new().with(SystemModule::Reports, ModulePermission::READ_ONLY),
        );
        let dropped =
            manager.create_custom_preset("Temp", "", EmployeeRole::Cook, ModulePermissions::new());
        manager.update_custom_preset(&keep.id, UpdatePresetDto::rename("Late shift"));
        manager.delete_custom_preset(&dropped.id);
        keep
    };

    let restored = PresetManager::with_store(Arc::new(JsonFilePresetStore::new(&path))).unwrap();
    let customs = restored.custom_presets();

    assert_eq!(customs.len(), 1);
    assert_eq!(customs[0].id, created.id);
    assert_eq!(customs[0].name, "Late shift");
    assert_eq!(customs[0].permissions, created.permissions);
}

#[test]
fn test_stored_entries_cannot_shadow_builtins() {
    let store = MemoryPresetStore::seeded(vec![
        stored_preset("manager", false),
        stored_preset("custom_flagged", true),
        stored_preset("custom_ok", false),
        stored_preset("custom_ok", false),
    ]);

    let manager = PresetManager::with_store(Arc::new(store)).unwrap();
    let customs = manager.custom_presets();

    assert_eq!(customs.len(), 1);
    assert_eq!(customs[0].id, PresetId::from("custom_ok"));
    assert_eq!(
        manager
            .preset_by_id(&PresetId::for_role(EmployeeRole::Manager))
            .unwrap()
            .name,
        "Manager"
    );
}

#[test]
fn test_unreadable_store_fails_construction() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("presets.json");
    std::fs::write(&path, "[{]").unwrap();

    assert!(PresetManager::with_store(Arc::new(JsonFilePresetStore::new(&path))).is_err());
}

#[test]
fn test_failed_save_keeps_in_memory_change() {
    let manager = PresetManager::with_store(Arc::new(BrokenStore)).unwrap();
    let preset = manager.create_custom_preset(
        "Unsaved",
        "",
        EmployeeRole::Bartender,
        ModulePermissions::new(),
    );

    assert!(manager.preset_by_id(&preset.id).is_some());
    assert!(manager.delete_custom_preset(&preset.id));
}

#[test]
fn test_memory_store_sees_every_mutation() {
    let store = Arc::new(MemoryPresetStore::new());
    let manager = PresetManager::with_store(store.clone()).unwrap();

    let preset = manager.create_custom_preset(
        "Bar back",
        "",
        EmployeeRole::Bartender,
        ModulePermissions::new(),
    );
    assert_eq!(store.load().unwrap().len(), 1);

    manager.delete_custom_preset(&preset.id);
    assert!(store.load().unwrap().is_empty());
}
