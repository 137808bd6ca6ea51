use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::Context;
use barflow::modules::permissions::PresetManager;
use barflow::modules::permissions::utils::{
    generate_permission_summary, has_permission, sanitize_permissions,
    validate_permission_configuration,
};
use barflow::modules::permissions::{ConfigurationValidation, PermissionSummary};
use barflow_models::{
    AccessLevel, EmployeeRole, ModulePermission, ModulePermissions, PermissionAction, SystemModule,
};

/// Reads a permission set from a JSON object keyed by module.
///
/// Flags are kept exactly as written so that `validate` can report them.
pub fn read_permissions(path: &Path) -> anyhow::Result<ModulePermissions> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse permission set in {}", path.display()))
}

fn flags(permission: ModulePermission) -> String {
    PermissionAction::ALL
        .into_iter()
        .map(|action| {
            if permission.allows(action) {
                action.as_str().chars().next().unwrap_or('?')
            } else {
                '-'
            }
        })
        .collect()
}

/// One line per role, most senior first.
pub fn render_roles(manager: &PresetManager) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<20} {:>4}  {:<8}  {}",
        "ROLE", "RANK", "ACCESS", "MANAGES"
    );

    for config in manager.role_configs() {
        let manages: Vec<&str> = config.manageable_roles.iter().map(|r| r.as_str()).collect();
        let access = match config.access_level {
            AccessLevel::Admin => "admin",
            AccessLevel::Manager => "manager",
            AccessLevel::User => "user",
        };
        let _ = writeln!(
            out,
            "{:<20} {:>4}  {:<8}  {}",
            config.role.as_str(),
            config.hierarchy,
            access,
            if manages.is_empty() {
                "-".to_string()
            } else {
                manages.join(", ")
            }
        );
    }

    out
}

/// Every module with its `vcea` flags for the role's default set.
pub fn render_defaults(manager: &PresetManager, role: EmployeeRole) -> String {
    let defaults = manager.default_permissions(role);
    let mut out = String::new();
    for module in SystemModule::ALL {
        let _ = writeln!(
            out,
            "{:<16} {}",
            module.as_str(),
            flags(defaults.effective(module))
        );
    }
    out
}

/// One line per preset with what it grants once laid over its base role.
pub fn render_presets(manager: &PresetManager) -> String {
    let mut out = String::new();
    for preset in manager.presets() {
        let kind = if preset.is_default { "built-in" } else { "custom" };
        let effective =
            preset.effective_permissions(&manager.default_permissions(preset.base_role));
        let _ = writeln!(
            out,
            "{:<40} {:<9} {:<18} {:<24} {}",
            preset.id.as_str(),
            kind,
            preset.base_role.as_str(),
            preset.name,
            generate_permission_summary(&effective)
        );
    }
    out
}

/// Resolves a check the way the HTTP guards do: override entries win,
/// modules without one fall back to the role default.
pub fn check(
    manager: &PresetManager,
    role: &str,
    module: &str,
    action: &str,
    overrides: Option<&ModulePermissions>,
) -> anyhow::Result<bool> {
    let role: EmployeeRole = role.parse()?;
    let module: SystemModule = module.parse()?;
    let action: PermissionAction = action.parse()?;

    Ok(has_permission(manager, role, module, action, overrides))
}

pub fn summary(manager: &PresetManager, role: &str) -> anyhow::Result<PermissionSummary> {
    let defaults = manager.default_permissions_by_key(role)?;
    Ok(generate_permission_summary(&defaults))
}

/// Validates a permission set. With `sanitize`, the repaired set is
/// returned alongside the findings for the original.
pub fn validate(
    permissions: &ModulePermissions,
    role: &str,
    sanitize: bool,
) -> anyhow::Result<(ConfigurationValidation, Option<ModulePermissions>)> {
    let role: EmployeeRole = role.parse()?;
    let result = validate_permission_configuration(permissions, role);
    let repaired = sanitize.then(|| sanitize_permissions(permissions));
    Ok((result, repaired))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_render_roles_lists_manager_first() {
        let manager = PresetManager::new();
        let rendered = render_roles(&manager);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 1 + EmployeeRole::ALL.len());
        assert!(lines[1].starts_with("manager"));
        assert!(lines[1].contains("admin"));
        assert!(rendered.contains("cashier_attendant"));
    }

    #[test]
    fn test_render_defaults_shows_flags() {
        let manager = PresetManager::new();
        let rendered = render_defaults(&manager, EmployeeRole::Cook);

        assert!(rendered.contains("kitchen_monitor  vce-"));
        assert!(rendered.contains("settings         ----"));
        assert_eq!(rendered.lines().count(), SystemModule::ALL.len());
    }

    #[test]
    fn test_render_presets_summarizes_effective_set() {
        let manager = PresetManager::new();
        manager.create_custom_preset(
            "Closing shift",
            "",
            EmployeeRole::Waiter,
            ModulePermissions::new().with(SystemModule::Reports, ModulePermission::READ_ONLY),
        );

        let rendered = render_presets(&manager);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), EmployeeRole::ALL.len() + 1);
        let custom = lines[EmployeeRole::ALL.len()];
        assert!(custom.starts_with("custom_"));
        assert!(custom.contains("Closing shift"));
        // Five waiter defaults plus reports.
        assert!(custom.ends_with("6 of 6 modules accessible (2 editable, 0 with admin rights)"));
    }

    #[test]
    fn test_check_resolves_keys() {
        let manager = PresetManager::new();
        assert!(check(&manager, "waiter", "orders", "edit", None).unwrap());
        assert!(!check(&manager, "cook", "bar_monitor", "view", None).unwrap());
        assert!(check(&manager, "dj", "orders", "view", None).is_err());
        assert!(check(&manager, "waiter", "jukebox", "view", None).is_err());
    }

    #[test]
    fn test_check_with_overrides() {
        let manager = PresetManager::new();
        let overrides =
            ModulePermissions::new().with(SystemModule::Reports, ModulePermission::READ_ONLY);

        assert!(check(&manager, "waiter", "reports", "view", Some(&overrides)).unwrap());
        assert!(check(&manager, "waiter", "orders", "create", Some(&overrides)).unwrap());
    }

    #[test]
    fn test_summary_for_manager() {
        let manager = PresetManager::new();
        let summary = summary(&manager, "manager").unwrap();

        assert_eq!(summary.total_modules, SystemModule::ALL.len());
        assert_eq!(summary.admin_modules, SystemModule::ALL.len());
        assert!(super::summary(&manager, "dj").is_err());
    }

    #[test]
    fn test_validate_file_and_sanitize() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"orders": {{"view": false, "edit": true}}, "dashboard": {{"view": true}}}}"#
        )
        .unwrap();

        let permissions = read_permissions(file.path()).unwrap();
        let (result, repaired) = validate(&permissions, "waiter", true).unwrap();

        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        let repaired = repaired.unwrap();
        assert!(repaired.effective(SystemModule::Orders).view());
        assert!(validate(&repaired, "waiter", false).unwrap().0.is_valid);
    }

    #[test]
    fn test_read_permissions_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(read_permissions(file.path()).is_err());
    }
}
