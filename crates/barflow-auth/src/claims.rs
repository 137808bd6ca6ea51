//! JWT claim structure for access tokens.

use barflow_core::PermissionError;
use barflow_models::{EmployeeRole, ModulePermissions};
use serde::{Deserialize, Serialize};

/// JWT claims for access tokens.
///
/// # Fields
///
/// - `sub`: User ID (subject)
/// - `email`: User's email address
/// - `role`: Role key as stored in the user profile (`"waiter"`, ...)
/// - `permissions`: Per-user override, absent when the employee uses the role defaults
/// - `exp`: Token expiration timestamp
/// - `iat`: Token issued-at timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// User's email address
    pub email: String,
    /// Role key. Kept as a string: the profile store may hold values this
    /// build does not know.
    pub role: String,
    /// Customized permissions for this user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<ModulePermissions>,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    /// The typed role, or `UnknownRole` for keys outside the enumeration.
    pub fn employee_role(&self) -> Result<EmployeeRole, PermissionError> {
        self.role.parse()
    }
}
