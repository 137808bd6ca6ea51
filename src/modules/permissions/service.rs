//! The preset manager: role defaults, role metadata and the custom preset
//! registry.
//!
//! One [`PresetManager`] is built per composition root and shared behind an
//! `Arc`. The role table is fixed at construction. Custom presets live in a
//! registry guarded by a single `RwLock` and are written through to the
//! configured [`PresetStore`] after every mutation.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use tracing::{error, info, instrument, warn};

use barflow_core::PermissionError;
use barflow_models::{
    AccessLevel, EmployeeRole, ModulePermission, ModulePermissions, PermissionAction,
    PermissionCheck, PermissionPreset, PresetId, RolePermissionConfig, SystemModule,
    UpdatePresetDto, UserId, UserType,
};

use super::context::UserPermissionContext;
use super::model::PermissionValidation;
use super::store::{MemoryPresetStore, PresetStore};

// ============ Role table ============

fn role_display_name(role: EmployeeRole) -> &'static str {
    match role {
        EmployeeRole::Manager => "Manager",
        EmployeeRole::CashierAttendant => "Cashier Attendant",
        EmployeeRole::Bartender => "Bartender",
        EmployeeRole::Waiter => "Waiter",
        EmployeeRole::Cook => "Cook",
    }
}

fn role_default_permissions(role: EmployeeRole) -> ModulePermissions {
    use ModulePermission as P;
    use SystemModule as M;

    match role {
        EmployeeRole::Manager => M::ALL.into_iter().map(|module| (module, P::FULL)).collect(),
        EmployeeRole::CashierAttendant => ModulePermissions::new()
            .with(M::Dashboard, P::READ_ONLY)
            .with(M::BarService, P::OPERATIONAL)
            .with(M::Tables, P::READ_WRITE)
            .with(M::Orders, P::READ_WRITE)
            .with(M::Customers, P::READ_WRITE)
            .with(M::Reports, P::READ_ONLY)
            .with(M::BarMonitor, P::READ_ONLY)
            .with(M::Inventory, P::READ_ONLY),
        EmployeeRole::Bartender => ModulePermissions::new()
            .with(M::Dashboard, P::READ_ONLY)
            .with(M::BarMonitor, P::OPERATIONAL)
            .with(M::BarService, P::READ_ONLY)
            .with(M::Orders, P::READ_ONLY)
            .with(M::Inventory, P::READ_WRITE),
        EmployeeRole::Waiter => ModulePermissions::new()
            .with(M::Dashboard, P::READ_ONLY)
            .with(M::BarService, P::OPERATIONAL)
            .with(M::Tables, P::READ_ONLY)
            .with(M::Orders, P::READ_WRITE)
            .with(M::Customers, P::READ_ONLY),
        EmployeeRole::Cook => ModulePermissions::new()
            .with(M::Dashboard, P::READ_ONLY)
            .with(M::KitchenMonitor, P::OPERATIONAL)
            .with(M::Orders, P::READ_ONLY)
            .with(M::Inventory, P::READ_ONLY),
    }
}

fn build_role_config(role: EmployeeRole) -> RolePermissionConfig {
    let (hierarchy, access_level, user_type, manageable): (_, _, _, &[EmployeeRole]) = match role
    {
        EmployeeRole::Manager => (
            5,
            AccessLevel::Admin,
            UserType::Administrator,
            &[
                EmployeeRole::CashierAttendant,
                EmployeeRole::Bartender,
                EmployeeRole::Waiter,
                EmployeeRole::Cook,
            ],
        ),
        // Outranks the bartender but only manages the floor staff.
        EmployeeRole::CashierAttendant => (
            3,
            AccessLevel::Manager,
            UserType::Employee,
            &[EmployeeRole::Waiter],
        ),
        EmployeeRole::Bartender => (2, AccessLevel::User, UserType::Employee, &[]),
        EmployeeRole::Waiter => (1, AccessLevel::User, UserType::Employee, &[]),
        EmployeeRole::Cook => (1, AccessLevel::User, UserType::Employee, &[]),
    };

    RolePermissionConfig {
        role,
        display_name: role_display_name(role).to_string(),
        hierarchy,
        access_level,
        user_type,
        default_permissions: role_default_permissions(role),
        manageable_roles: manageable.iter().copied().collect::<BTreeSet<_>>(),
    }
}

fn builtin_preset(config: &RolePermissionConfig) -> PermissionPreset {
    let now = Utc::now();
    PermissionPreset {
        id: PresetId::for_role(config.role),
        name: config.display_name.clone(),
        description: format!("Default permissions for the {} role", config.display_name),
        base_role: config.role,
        permissions: config.default_permissions.clone(),
        is_default: true,
        is_customizable: true,
        created_at: now,
        updated_at: now,
    }
}

// ============ Manager ============

pub struct PresetManager {
    /// Indexed by [`EmployeeRole::index`].
    role_configs: [RolePermissionConfig; 5],
    builtin_presets: Vec<PermissionPreset>,
    /// Custom presets in creation order.
    custom_presets: RwLock<Vec<PermissionPreset>>,
    store: Arc<dyn PresetStore>,
}

impl std::fmt::Debug for PresetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresetManager")
            .field("roles", &self.role_configs.len())
            .field("custom_presets", &self.custom_presets.read().len())
            .finish()
    }
}

impl Default for PresetManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetManager {
    /// A manager backed by an in-memory store.
    pub fn new() -> Self {
        let role_configs = EmployeeRole::ALL.map(build_role_config);
        let builtin_presets = Self::ordered(&role_configs)
            .into_iter()
            .map(builtin_preset)
            .collect();

        Self {
            role_configs,
            builtin_presets,
            custom_presets: RwLock::new(Vec::new()),
            store: Arc::new(MemoryPresetStore::new()),
        }
    }

    /// A manager that loads custom presets from `store` and writes every
    /// change back to it.
    ///
    /// Stored entries flagged as built-in, or whose id is a role key, are
    /// skipped.
    pub fn with_store(store: Arc<dyn PresetStore>) -> anyhow::Result<Self> {
        let loaded = store.load()?;
        let mut manager = Self::new();

        let mut registry: Vec<PermissionPreset> = Vec::with_capacity(loaded.len());
        for preset in loaded {
            if preset.is_default || preset.id.is_role_key() {
                warn!(preset_id = %preset.id, "Skipping stored preset that shadows a built-in");
                continue;
            }
            if registry.iter().any(|p| p.id == preset.id) {
                warn!(preset_id = %preset.id, "Skipping duplicate stored preset");
                continue;
            }
            registry.push(preset);
        }

        info!(count = registry.len(), "Loaded custom permission presets");
        manager.custom_presets = RwLock::new(registry);
        manager.store = store;
        Ok(manager)
    }

    fn ordered(configs: &[RolePermissionConfig]) -> Vec<&RolePermissionConfig> {
        let mut ordered: Vec<_> = configs.iter().collect();
        ordered.sort_by(|a, b| b.hierarchy.cmp(&a.hierarchy).then(a.role.cmp(&b.role)));
        ordered
    }

    fn persist(&self, registry: &[PermissionPreset]) {
        if let Err(e) = self.store.save(registry) {
            error!(error = %e, "Failed to persist custom permission presets");
        }
    }

    // ============ Role queries ============

    pub fn default_permissions(&self, role: EmployeeRole) -> ModulePermissions {
        self.role_config(role).default_permissions.clone()
    }

    pub fn default_permissions_by_key(
        &self,
        role: &str,
    ) -> Result<ModulePermissions, PermissionError> {
        let role: EmployeeRole = role.parse()?;
        Ok(self.default_permissions(role))
    }

    pub fn role_config(&self, role: EmployeeRole) -> &RolePermissionConfig {
        &self.role_configs[role.index()]
    }

    pub fn role_config_by_key(&self, role: &str) -> Result<&RolePermissionConfig, PermissionError> {
        let role: EmployeeRole = role.parse()?;
        Ok(self.role_config(role))
    }

    /// Every role, most senior first.
    pub fn role_configs(&self) -> Vec<&RolePermissionConfig> {
        Self::ordered(&self.role_configs)
    }

    pub fn can_manage_role(&self, manager: EmployeeRole, target: EmployeeRole) -> bool {
        self.role_config(manager).can_manage(target)
    }

    /// Unknown keys on either side mean "no".
    pub fn can_manage_role_by_key(&self, manager: &str, target: &str) -> bool {
        match (manager.parse(), target.parse()) {
            (Ok(manager), Ok(target)) => self.can_manage_role(manager, target),
            _ => false,
        }
    }

    pub fn validate_permission(
        &self,
        role: &str,
        module: SystemModule,
        action: PermissionAction,
    ) -> PermissionValidation {
        let role: EmployeeRole = match role.parse() {
            Ok(role) => role,
            Err(e) => {
                return PermissionValidation {
                    is_valid: false,
                    has_access: false,
                    errors: vec![e.to_string()],
                    missing_permissions: Vec::new(),
                };
            }
        };

        let has_access = self
            .role_config(role)
            .default_permissions
            .effective(module)
            .allows(action);

        PermissionValidation {
            is_valid: true,
            has_access,
            errors: Vec::new(),
            missing_permissions: if has_access {
                Vec::new()
            } else {
                vec![PermissionCheck::new(module, action).to_string()]
            },
        }
    }

    pub fn required_modules_for_role(&self, role: EmployeeRole) -> Vec<SystemModule> {
        self.role_config(role).modules()
    }

    pub fn role_hierarchy(&self, role: EmployeeRole) -> u8 {
        self.role_config(role).hierarchy
    }

    pub fn manageable_roles(&self, role: EmployeeRole) -> Vec<EmployeeRole> {
        self.role_config(role)
            .manageable_roles
            .iter()
            .copied()
            .collect()
    }

    /// Entries of a supplied custom set replace the role default for their
    /// module; modules it does not mention keep the default.
    pub fn create_user_permission_context(
        &self,
        user_id: UserId,
        role: EmployeeRole,
        custom_permissions: Option<ModulePermissions>,
    ) -> UserPermissionContext<'_> {
        let defaults = self.default_permissions(role);
        let (permissions, is_customized) = match custom_permissions {
            Some(custom) => (defaults.overlay(&custom), true),
            None => (defaults, false),
        };

        UserPermissionContext::new(self, user_id, role, permissions, is_customized)
    }

    // ============ Presets ============

    /// Built-in presets (most senior role first) followed by custom presets
    /// in creation order.
    pub fn presets(&self) -> Vec<PermissionPreset> {
        let mut presets = self.builtin_presets.clone();
        presets.extend(self.custom_presets());
        presets
    }

    pub fn custom_presets(&self) -> Vec<PermissionPreset> {
        self.custom_presets.read().clone()
    }

    pub fn preset_by_id(&self, id: &PresetId) -> Option<PermissionPreset> {
        if let Some(builtin) = self.builtin_presets.iter().find(|p| &p.id == id) {
            return Some(builtin.clone());
        }
        self.custom_presets
            .read()
            .iter()
            .find(|p| &p.id == id)
            .cloned()
    }

    #[instrument(skip(self, description, overrides))]
    pub fn create_custom_preset(
        &self,
        name: &str,
        description: &str,
        base_role: EmployeeRole,
        overrides: ModulePermissions,
    ) -> PermissionPreset {
        let now = Utc::now();
        let preset = PermissionPreset {
            id: PresetId::custom(),
            name: name.to_string(),
            description: description.to_string(),
            base_role,
            permissions: overrides,
            is_default: false,
            is_customizable: true,
            created_at: now,
            updated_at: now,
        };

        let mut registry = self.custom_presets.write();
        registry.push(preset.clone());
        self.persist(&registry);

        info!(preset_id = %preset.id, "Custom permission preset created");
        preset
    }

    /// `None` when `id` is unknown or names a built-in preset.
    #[instrument(skip(self, patch))]
    pub fn update_custom_preset(
        &self,
        id: &PresetId,
        patch: UpdatePresetDto,
    ) -> Option<PermissionPreset> {
        let mut registry = self.custom_presets.write();
        let preset = registry.iter_mut().find(|p| &p.id == id)?;
        preset.apply(patch);
        let updated = preset.clone();
        self.persist(&registry);

        info!(preset_id = %id, "Custom permission preset updated");
        Some(updated)
    }

    /// `false` when `id` is unknown or names a built-in preset.
    #[instrument(skip(self))]
    pub fn delete_custom_preset(&self, id: &PresetId) -> bool {
        let mut registry = self.custom_presets.write();
        let Some(index) = registry.iter().position(|p| &p.id == id) else {
            return false;
        };
        registry.remove(index);
        self.persist(&registry);

        info!(preset_id = %id, "Custom permission preset deleted");
        true
    }
}
