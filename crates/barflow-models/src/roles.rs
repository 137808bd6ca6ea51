//! Employee roles and their static metadata.

use barflow_core::PermissionError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::permissions::{ModulePermissions, SystemModule};

/// The built-in employee job functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    CashierAttendant,
    Waiter,
    Cook,
    Bartender,
    Manager,
}

impl EmployeeRole {
    pub const ALL: [EmployeeRole; 5] = [
        Self::CashierAttendant,
        Self::Waiter,
        Self::Cook,
        Self::Bartender,
        Self::Manager,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CashierAttendant => "cashier_attendant",
            Self::Waiter => "waiter",
            Self::Cook => "cook",
            Self::Bartender => "bartender",
            Self::Manager => "manager",
        }
    }

    /// Position of the role in [`EmployeeRole::ALL`].
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::CashierAttendant => 0,
            Self::Waiter => 1,
            Self::Cook => 2,
            Self::Bartender => 3,
            Self::Manager => 4,
        }
    }
}

impl fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeRole {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| PermissionError::UnknownRole(s.to_string()))
    }
}

/// Access tier used by route guards. Ordered from least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    User,
    Manager,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Employee,
    Administrator,
}

/// Static metadata for one role. Built once when the preset manager is
/// created and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermissionConfig {
    pub role: EmployeeRole,
    pub display_name: String,
    /// Seniority; higher outranks lower.
    pub hierarchy: u8,
    pub access_level: AccessLevel,
    pub user_type: UserType,
    pub default_permissions: ModulePermissions,
    /// Roles this role may manage. Listed explicitly, not derived from
    /// `hierarchy`.
    pub manageable_roles: BTreeSet<EmployeeRole>,
}

impl RolePermissionConfig {
    pub fn can_manage(&self, target: EmployeeRole) -> bool {
        self.manageable_roles.contains(&target)
    }

    /// Modules the role has an explicit default entry for.
    pub fn modules(&self) -> Vec<SystemModule> {
        self.default_permissions.modules().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("manager".parse::<EmployeeRole>(), Ok(EmployeeRole::Manager));
        assert_eq!(
            "cashier_attendant".parse::<EmployeeRole>(),
            Ok(EmployeeRole::CashierAttendant)
        );
        assert_eq!(
            "nonexistent-role".parse::<EmployeeRole>(),
            Err(PermissionError::UnknownRole("nonexistent-role".to_string()))
        );
    }

    #[test]
    fn test_index_matches_all_order() {
        for (position, role) in EmployeeRole::ALL.iter().enumerate() {
            assert_eq!(role.index(), position);
        }
    }

    #[test]
    fn test_serde_matches_as_str() {
        for role in EmployeeRole::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
            let back: EmployeeRole = serde_json::from_str(&json).unwrap();
            assert_eq!(back, role);
        }
    }

    #[test]
    fn test_access_level_ordering() {
        assert!(AccessLevel::Admin > AccessLevel::Manager);
        assert!(AccessLevel::Manager > AccessLevel::User);
    }
}
