//! Stateless helpers over the preset manager's role table.
//!
//! These are what guards and navigation builders call. They never fail:
//! denials come back as `false`, findings as result structs.

use barflow_models::{
    EmployeeRole, ModulePermission, ModulePermissions, PermissionAction, PermissionCheck,
    SystemModule,
};

use super::model::{ConfigurationValidation, PermissionSummary};
use super::service::PresetManager;

fn resolve(
    manager: &PresetManager,
    role: EmployeeRole,
    module: SystemModule,
    overrides: Option<&ModulePermissions>,
) -> ModulePermission {
    // An override entry for the module replaces the role default outright.
    overrides
        .and_then(|custom| custom.get(module))
        .unwrap_or_else(|| {
            manager
                .role_config(role)
                .default_permissions
                .effective(module)
        })
}

pub fn has_permission(
    manager: &PresetManager,
    role: EmployeeRole,
    module: SystemModule,
    action: PermissionAction,
    overrides: Option<&ModulePermissions>,
) -> bool {
    resolve(manager, role, module, overrides).allows(action)
}

/// True when the role passes every check. An empty list passes.
pub fn has_multiple_permissions(
    manager: &PresetManager,
    role: EmployeeRole,
    checks: &[PermissionCheck],
) -> bool {
    checks
        .iter()
        .all(|check| has_permission(manager, role, check.module, check.action, None))
}

pub fn can_access_module(
    manager: &PresetManager,
    role: EmployeeRole,
    module: SystemModule,
    overrides: Option<&ModulePermissions>,
) -> bool {
    has_permission(manager, role, module, PermissionAction::View, overrides)
}

pub fn can_manage_user(
    manager: &PresetManager,
    manager_role: EmployeeRole,
    target_role: EmployeeRole,
) -> bool {
    manager.can_manage_role(manager_role, target_role)
}

/// Modules the role can view, in module order.
pub fn accessible_modules(
    manager: &PresetManager,
    role: EmployeeRole,
    overrides: Option<&ModulePermissions>,
) -> Vec<SystemModule> {
    SystemModule::ALL
        .into_iter()
        .filter(|module| can_access_module(manager, role, *module, overrides))
        .collect()
}

/// Reports every module entry that grants create, edit or administer
/// without view.
pub fn validate_permission_configuration(
    permissions: &ModulePermissions,
    role: EmployeeRole,
) -> ConfigurationValidation {
    let errors: Vec<String> = permissions
        .iter()
        .filter(|(_, permission)| !permission.is_consistent())
        .map(|(module, permission)| {
            let granted: Vec<&str> = permission
                .granted_actions()
                .into_iter()
                .map(|action| action.as_str())
                .collect();
            format!(
                "{}: module '{}' grants {} without view access",
                role,
                module,
                granted.join(", ")
            )
        })
        .collect();

    ConfigurationValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Turns `view` on for every entry that grants a write capability.
/// Consistent entries are kept as they are.
pub fn sanitize_permissions(permissions: &ModulePermissions) -> ModulePermissions {
    permissions
        .iter()
        .map(|(module, permission)| (module, permission.sanitized()))
        .collect()
}

pub fn generate_permission_summary(permissions: &ModulePermissions) -> PermissionSummary {
    permissions.iter().fold(
        PermissionSummary {
            total_modules: permissions.len(),
            ..PermissionSummary::default()
        },
        |mut summary, (_, permission)| {
            if permission.view() {
                summary.accessible_modules += 1;
            }
            if permission.edit() {
                summary.editable_modules += 1;
            }
            if permission.administer() {
                summary.admin_modules += 1;
            }
            summary
        },
    )
}

pub fn get_default_permissions_for_role(
    manager: &PresetManager,
    role: EmployeeRole,
) -> ModulePermissions {
    manager.default_permissions(role)
}

/// Exact equality with the role's defaults, all four flags on every module.
pub fn is_default_permission_set(
    manager: &PresetManager,
    permissions: &ModulePermissions,
    role: EmployeeRole,
) -> bool {
    manager.role_config(role).default_permissions == *permissions
}
