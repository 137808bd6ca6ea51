//! Strongly-typed identifiers.
//!
//! [`UserId`] wraps the UUID handed out by the external user profile store.
//! [`PresetId`] is a string: built-in presets are keyed by their role
//! (`"manager"`, `"waiter"`, ...) while custom presets get a generated
//! `custom_<uuid>` key that can never collide with a role key.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::roles::EmployeeRole;

/// Strongly-typed ID for employee user accounts.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Create a new random ID.
    #[inline]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an ID from an existing UUID.
    #[inline]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for UserId {
    #[inline]
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl std::str::FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Identifier of a permission preset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetId(String);

impl PresetId {
    const CUSTOM_PREFIX: &'static str = "custom_";

    /// The id of the built-in preset for `role`.
    pub fn for_role(role: EmployeeRole) -> Self {
        Self(role.as_str().to_string())
    }

    /// A fresh id for an administrator-defined preset.
    pub fn custom() -> Self {
        Self(format!(
            "{}{}",
            Self::CUSTOM_PREFIX,
            Uuid::new_v4().simple()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id names a built-in role preset.
    pub fn is_role_key(&self) -> bool {
        self.0.parse::<EmployeeRole>().is_ok()
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PresetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PresetId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
