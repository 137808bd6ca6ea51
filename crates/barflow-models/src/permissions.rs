//! Per-module capability records.
//!
//! A [`ModulePermission`] carries four flags: `view`, `create`, `edit` and
//! `administer`. The last three imply `view`. Every constructor in this module
//! normalizes towards that rule, so a value built in code is always
//! consistent. Values that come from outside (deserialized JSON, token
//! claims, [`ModulePermission::from_raw`]) are kept bit-for-bit so that the
//! validation and sanitization utilities can see and repair them.
//!
//! A [`ModulePermissions`] maps [`SystemModule`] to [`ModulePermission`]. A
//! missing module means no access at all.

use barflow_core::PermissionError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A functional area of the application that permissions are scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemModule {
    /// Landing page with the shift overview
    Dashboard,
    /// Counter and floor service (opening tabs, serving customers)
    BarService,
    /// Table layout and occupancy
    Tables,
    /// Comandas and their line items
    Orders,
    /// Kitchen production queue
    KitchenMonitor,
    /// Bar production queue
    BarMonitor,
    /// Customer registry
    Customers,
    /// Employee registry and role assignment
    Employees,
    /// Stock of products and ingredients
    Inventory,
    /// Sales and shift reports
    Reports,
    /// Environment and venue configuration
    Settings,
}

impl SystemModule {
    pub const ALL: [SystemModule; 11] = [
        Self::Dashboard,
        Self::BarService,
        Self::Tables,
        Self::Orders,
        Self::KitchenMonitor,
        Self::BarMonitor,
        Self::Customers,
        Self::Employees,
        Self::Inventory,
        Self::Reports,
        Self::Settings,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::BarService => "bar_service",
            Self::Tables => "tables",
            Self::Orders => "orders",
            Self::KitchenMonitor => "kitchen_monitor",
            Self::BarMonitor => "bar_monitor",
            Self::Customers => "customers",
            Self::Employees => "employees",
            Self::Inventory => "inventory",
            Self::Reports => "reports",
            Self::Settings => "settings",
        }
    }

    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::BarService => "Bar Service",
            Self::Tables => "Tables",
            Self::Orders => "Orders",
            Self::KitchenMonitor => "Kitchen Monitor",
            Self::BarMonitor => "Bar Monitor",
            Self::Customers => "Customers",
            Self::Employees => "Employees",
            Self::Inventory => "Inventory",
            Self::Reports => "Reports",
            Self::Settings => "Settings",
        }
    }
}

impl fmt::Display for SystemModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SystemModule {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|module| module.as_str() == s)
            .ok_or_else(|| PermissionError::UnknownModule(s.to_string()))
    }
}

/// One of the four capabilities evaluated per module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionAction {
    View,
    Create,
    Edit,
    Administer,
}

impl PermissionAction {
    pub const ALL: [PermissionAction; 4] =
        [Self::View, Self::Create, Self::Edit, Self::Administer];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Administer => "administer",
        }
    }
}

impl fmt::Display for PermissionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionAction {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| PermissionError::UnknownAction(s.to_string()))
    }
}

/// Capabilities of one role (or user) on one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModulePermission {
    view: bool,
    create: bool,
    edit: bool,
    administer: bool,
}

impl ModulePermission {
    /// No access.
    pub const EMPTY: Self = Self::from_raw(false, false, false, false);
    /// Look, don't touch.
    pub const READ_ONLY: Self = Self::from_raw(true, false, false, false);
    /// View, create and edit.
    pub const READ_WRITE: Self = Self::from_raw(true, true, true, false);
    /// Day-to-day operation of a service module (take orders, move items
    /// through a monitor) without administering it.
    pub const OPERATIONAL: Self = Self::from_raw(true, true, true, false);
    /// Everything.
    pub const FULL: Self = Self::from_raw(true, true, true, true);

    /// Builds a consistent record: any write capability turns `view` on.
    #[must_use]
    pub const fn new(view: bool, create: bool, edit: bool, administer: bool) -> Self {
        Self {
            view: view || create || edit || administer,
            create,
            edit,
            administer,
        }
    }

    /// Keeps the flags exactly as given, even when they break the
    /// view-implication rule. Meant for values read from external sources.
    #[must_use]
    pub const fn from_raw(view: bool, create: bool, edit: bool, administer: bool) -> Self {
        Self {
            view,
            create,
            edit,
            administer,
        }
    }

    #[must_use]
    pub const fn view(&self) -> bool {
        self.view
    }

    #[must_use]
    pub const fn create(&self) -> bool {
        self.create
    }

    #[must_use]
    pub const fn edit(&self) -> bool {
        self.edit
    }

    #[must_use]
    pub const fn administer(&self) -> bool {
        self.administer
    }

    /// Whether the flag for `action` is set.
    #[must_use]
    pub const fn allows(&self, action: PermissionAction) -> bool {
        match action {
            PermissionAction::View => self.view,
            PermissionAction::Create => self.create,
            PermissionAction::Edit => self.edit,
            PermissionAction::Administer => self.administer,
        }
    }

    /// Grants `action` (and `view` with it).
    #[must_use]
    pub const fn with(self, action: PermissionAction) -> Self {
        let mut next = self;
        match action {
            PermissionAction::View => next.view = true,
            PermissionAction::Create => next.create = true,
            PermissionAction::Edit => next.edit = true,
            PermissionAction::Administer => next.administer = true,
        }
        next.view = next.view || next.create || next.edit || next.administer;
        next
    }

    /// `true` unless a write capability is set while `view` is not.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.view || !(self.create || self.edit || self.administer)
    }

    /// The repaired form of this record: `view` forced on when any write
    /// capability is set, everything else unchanged.
    #[must_use]
    pub const fn sanitized(&self) -> Self {
        Self::new(self.view, self.create, self.edit, self.administer)
    }

    /// `true` when no flag is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.view || self.create || self.edit || self.administer)
    }

    /// The actions whose flag is set, in declaration order.
    pub fn granted_actions(&self) -> Vec<PermissionAction> {
        PermissionAction::ALL
            .into_iter()
            .filter(|action| self.allows(*action))
            .collect()
    }
}

/// Capabilities keyed by module. Modules without an entry deny everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModulePermissions(BTreeMap<SystemModule, ModulePermission>);

impl ModulePermissions {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, module: SystemModule, permission: ModulePermission) -> Self {
        self.0.insert(module, permission);
        self
    }

    pub fn insert(
        &mut self,
        module: SystemModule,
        permission: ModulePermission,
    ) -> Option<ModulePermission> {
        self.0.insert(module, permission)
    }

    pub fn remove(&mut self, module: SystemModule) -> Option<ModulePermission> {
        self.0.remove(&module)
    }

    /// The explicit entry for `module`, if any.
    pub fn get(&self, module: SystemModule) -> Option<ModulePermission> {
        self.0.get(&module).copied()
    }

    /// The entry for `module`, or [`ModulePermission::EMPTY`] when absent.
    pub fn effective(&self, module: SystemModule) -> ModulePermission {
        self.get(module).unwrap_or(ModulePermission::EMPTY)
    }

    pub fn contains(&self, module: SystemModule) -> bool {
        self.0.contains_key(&module)
    }

    pub fn modules(&self) -> impl Iterator<Item = SystemModule> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SystemModule, ModulePermission)> + '_ {
        self.0.iter().map(|(module, permission)| (*module, *permission))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A copy of `self` with every entry of `overrides` laid on top.
    /// Entries in `overrides` replace whole records; modules they do not
    /// mention keep the value from `self`.
    #[must_use]
    pub fn overlay(&self, overrides: &ModulePermissions) -> ModulePermissions {
        let mut merged = self.clone();
        for (module, permission) in overrides.iter() {
            merged.insert(module, permission);
        }
        merged
    }
}

impl FromIterator<(SystemModule, ModulePermission)> for ModulePermissions {
    fn from_iter<I: IntoIterator<Item = (SystemModule, ModulePermission)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One `(module, action)` pair to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionCheck {
    pub module: SystemModule,
    pub action: PermissionAction,
}

impl PermissionCheck {
    pub const fn new(module: SystemModule, action: PermissionAction) -> Self {
        Self { module, action }
    }
}

impl fmt::Display for PermissionCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module, self.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_constants_are_consistent() {
        for permission in [
            ModulePermission::EMPTY,
            ModulePermission::READ_ONLY,
            ModulePermission::READ_WRITE,
            ModulePermission::OPERATIONAL,
            ModulePermission::FULL,
        ] {
            assert!(permission.is_consistent(), "{:?}", permission);
        }
        assert!(ModulePermission::EMPTY.is_empty());
        assert!(ModulePermission::FULL.administer());
        assert!(!ModulePermission::READ_WRITE.administer());
    }

    #[test]
    fn test_new_normalizes_view() {
        for (create, edit, administer) in [
            (true, false, false),
            (false, true, false),
            (false, false, true),
        ] {
            let permission = ModulePermission::new(false, create, edit, administer);
            assert!(permission.view());
            assert!(permission.is_consistent());
        }
        assert_eq!(
            ModulePermission::new(false, false, false, false),
            ModulePermission::EMPTY
        );
    }

    #[test]
    fn test_from_raw_keeps_inconsistency() {
        let raw = ModulePermission::from_raw(false, false, true, false);
        assert!(!raw.view());
        assert!(!raw.is_consistent());
        assert_eq!(raw.sanitized(), ModulePermission::new(true, false, true, false));
    }

    #[test]
    fn test_with_implies_view() {
        let permission = ModulePermission::EMPTY.with(PermissionAction::Administer);
        assert!(permission.view());
        assert!(permission.administer());
        assert!(!permission.create());
    }

    #[test]
    fn test_granted_actions() {
        assert_eq!(
            ModulePermission::READ_WRITE.granted_actions(),
            vec![
                PermissionAction::View,
                PermissionAction::Create,
                PermissionAction::Edit
            ]
        );
        assert!(ModulePermission::EMPTY.granted_actions().is_empty());
    }

    #[test]
    fn test_module_and_action_parsing() {
        assert_eq!(
            "bar_monitor".parse::<SystemModule>(),
            Ok(SystemModule::BarMonitor)
        );
        assert_eq!(
            "casino".parse::<SystemModule>(),
            Err(PermissionError::UnknownModule("casino".to_string()))
        );
        assert_eq!(
            "administer".parse::<PermissionAction>(),
            Ok(PermissionAction::Administer)
        );
        assert!("delete".parse::<PermissionAction>().is_err());
    }

    #[test]
    fn test_module_keys_match_serde() {
        for module in SystemModule::ALL {
            let json = serde_json::to_string(&module).unwrap();
            assert_eq!(json, format!("\"{}\"", module.as_str()));
        }
    }

    #[test]
    fn test_missing_module_is_empty() {
        let permissions =
            ModulePermissions::new().with(SystemModule::Dashboard, ModulePermission::READ_ONLY);
        assert_eq!(
            permissions.effective(SystemModule::Employees),
            ModulePermission::EMPTY
        );
        assert_eq!(permissions.get(SystemModule::Employees), None);
        assert!(permissions.contains(SystemModule::Dashboard));
    }

    #[test]
    fn test_overlay_replaces_whole_entries() {
        let base = ModulePermissions::new()
            .with(SystemModule::Dashboard, ModulePermission::READ_ONLY)
            .with(SystemModule::Orders, ModulePermission::READ_WRITE);
        let overrides =
            ModulePermissions::new().with(SystemModule::Orders, ModulePermission::READ_ONLY);

        let merged = base.overlay(&overrides);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get(SystemModule::Orders), Some(ModulePermission::READ_ONLY));
        assert_eq!(
            merged.get(SystemModule::Dashboard),
            Some(ModulePermission::READ_ONLY)
        );
    }

    #[test]
    fn test_deserialize_keeps_raw_flags() {
        let json = r#"{"employees":{"view":false,"edit":true},"dashboard":{"view":true}}"#;
        let permissions: ModulePermissions = serde_json::from_str(json).unwrap();

        let employees = permissions.get(SystemModule::Employees).unwrap();
        assert!(!employees.view());
        assert!(employees.edit());
        assert!(!employees.create());
        assert_eq!(
            permissions.get(SystemModule::Dashboard),
            Some(ModulePermission::READ_ONLY)
        );
    }

    #[test]
    fn test_serialize_uses_module_keys() {
        let permissions =
            ModulePermissions::new().with(SystemModule::BarService, ModulePermission::FULL);
        let value = serde_json::to_value(&permissions).unwrap();
        assert_eq!(value["bar_service"]["administer"], true);
    }

    #[test]
    fn test_permission_check_display() {
        let check = PermissionCheck::new(SystemModule::Reports, PermissionAction::View);
        assert_eq!(check.to_string(), "reports:view");
    }
}
