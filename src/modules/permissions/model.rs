use std::fmt;

use serde::{Deserialize, Serialize};

use barflow_models::{
    EmployeeRole, ModulePermission, ModulePermissions, PermissionAction, SystemModule, UserId,
};

/// Outcome of checking a role key against one `(module, action)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionValidation {
    /// False when the role key is unknown.
    pub is_valid: bool,
    pub has_access: bool,
    pub errors: Vec<String>,
    /// `module:action` entries the role lacks.
    pub missing_permissions: Vec<String>,
}

/// Findings from validating a permission set against a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PermissionSummary {
    pub total_modules: usize,
    pub accessible_modules: usize,
    pub editable_modules: usize,
    pub admin_modules: usize,
}

impl fmt::Display for PermissionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} modules accessible ({} editable, {} with admin rights)",
            self.accessible_modules, self.total_modules, self.editable_modules, self.admin_modules
        )
    }
}

// ============ Request / response DTOs ============

#[derive(Debug, Clone, Deserialize)]
pub struct CheckQuery {
    pub module: SystemModule,
    pub action: PermissionAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    pub module: SystemModule,
    pub action: PermissionAction,
    pub allowed: bool,
}

/// `role` stays a string so unknown keys are reported in the body rather
/// than rejected by the extractor.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateQuery {
    pub role: String,
    pub module: SystemModule,
    pub action: PermissionAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleAccess {
    pub module: SystemModule,
    pub display_name: String,
    pub permission: ModulePermission,
}

/// The caller's resolved permissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub user_id: UserId,
    pub email: String,
    pub role: EmployeeRole,
    pub hierarchy: u8,
    pub is_customized: bool,
    pub permissions: ModulePermissions,
    pub summary: PermissionSummary,
    pub accessible_modules: Vec<ModuleAccess>,
    pub manageable_roles: Vec<EmployeeRole>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_display() {
        let summary = PermissionSummary {
            total_modules: 3,
            accessible_modules: 2,
            editable_modules: 1,
            admin_modules: 1,
        };
        assert_eq!(
            summary.to_string(),
            "2 of 3 modules accessible (1 editable, 1 with admin rights)"
        );
    }

    #[test]
    fn test_validate_query_keeps_unknown_role() {
        let query: ValidateQuery =
            serde_json::from_str(r#"{"role":"dj","module":"orders","action":"view"}"#).unwrap();
        assert_eq!(query.role, "dj");
        assert_eq!(query.module, SystemModule::Orders);
    }
}
