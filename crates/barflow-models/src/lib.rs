//! # Barflow Models
//!
//! The permission model: the vocabulary every other layer speaks.
//!
//! # Modules
//!
//! - [`ids`]: Strongly-typed identifiers for users and presets
//! - [`permissions`]: System modules, actions, and per-module capability records
//! - [`roles`]: Employee roles and their static metadata
//! - [`presets`]: Named permission bundles and their DTOs
//!
//! # Example
//!
//! ```ignore
//! use barflow_models::{ModulePermission, ModulePermissions, PermissionAction, SystemModule};
//!
//! let permissions = ModulePermissions::new()
//!     .with(SystemModule::Dashboard, ModulePermission::READ_ONLY)
//!     .with(SystemModule::Orders, ModulePermission::READ_WRITE);
//!
//! assert!(permissions.effective(SystemModule::Orders).allows(PermissionAction::Edit));
//! assert!(!permissions.effective(SystemModule::Reports).allows(PermissionAction::View));
//! ```

pub mod ids;
pub mod permissions;
pub mod presets;
pub mod roles;

// Re-export commonly used types at crate root for convenience
pub use ids::{PresetId, UserId};
pub use permissions::{
    ModulePermission, ModulePermissions, PermissionAction, PermissionCheck, SystemModule,
};
pub use presets::{CreatePresetDto, PermissionPreset, UpdatePresetDto};
pub use roles::{AccessLevel, EmployeeRole, RolePermissionConfig, UserType};
