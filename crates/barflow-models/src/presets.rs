//! Permission presets and their DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::PresetId;
use crate::permissions::ModulePermissions;
use crate::roles::EmployeeRole;

/// A named bundle of module permissions derived from a base role.
///
/// Built-in presets (`is_default = true`) mirror the five role defaults and
/// are immutable. Custom presets are created by administrators and hold
/// overrides that are laid over the base role's defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionPreset {
    pub id: PresetId,
    pub name: String,
    pub description: String,
    pub base_role: EmployeeRole,
    pub permissions: ModulePermissions,
    pub is_default: bool,
    pub is_customizable: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PermissionPreset {
    /// The preset's permissions applied over `base_defaults`.
    pub fn effective_permissions(&self, base_defaults: &ModulePermissions) -> ModulePermissions {
        base_defaults.overlay(&self.permissions)
    }

    /// Folds the set fields of `patch` into this preset and bumps `updated_at`.
    pub fn apply(&mut self, patch: UpdatePresetDto) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(base_role) = patch.base_role {
            self.base_role = base_role;
        }
        if let Some(permissions) = patch.permissions {
            self.permissions = permissions;
        }
        self.updated_at = Utc::now();
    }
}

// DTOs

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePresetDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: String,
    pub base_role: EmployeeRole,
    /// Overrides laid over the base role's defaults.
    #[serde(default)]
    pub permissions: ModulePermissions,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePresetDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,
    pub base_role: Option<EmployeeRole>,
    pub permissions: Option<ModulePermissions>,
}

impl UpdatePresetDto {
    /// A patch that only renames.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}
