use barflow_models::{
    EmployeeRole, ModulePermission, ModulePermissions, PermissionAction, SystemModule, UserId,
};

use super::service::PresetManager;

/// A user's effective permissions, resolved once per request.
#[derive(Debug, Clone)]
pub struct UserPermissionContext<'a> {
    pub user_id: UserId,
    pub role: EmployeeRole,
    pub permissions: ModulePermissions,
    /// Whether a per-user override was applied over the role defaults.
    pub is_customized: bool,
    manager: &'a PresetManager,
}

impl<'a> UserPermissionContext<'a> {
    pub(crate) fn new(
        manager: &'a PresetManager,
        user_id: UserId,
        role: EmployeeRole,
        permissions: ModulePermissions,
        is_customized: bool,
    ) -> Self {
        Self {
            user_id,
            role,
            permissions,
            is_customized,
            manager,
        }
    }

    pub fn permission(&self, module: SystemModule) -> ModulePermission {
        self.permissions.effective(module)
    }

    pub fn can_access(&self, module: SystemModule, action: PermissionAction) -> bool {
        self.permission(module).allows(action)
    }

    /// Whether this user's role may manage `target`.
    pub fn can_manage(&self, target: EmployeeRole) -> bool {
        self.manager.can_manage_role(self.role, target)
    }

    pub fn manageable_roles(&self) -> Vec<EmployeeRole> {
        self.manager.manageable_roles(self.role)
    }

    /// Modules where the user holds at least view access, in module order.
    pub fn accessible_modules(&self) -> Vec<SystemModule> {
        self.permissions
            .iter()
            .filter(|(_, permission)| permission.view())
            .map(|(module, _)| module)
            .collect()
    }
}
