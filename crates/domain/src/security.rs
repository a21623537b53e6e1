use std::str::FromStr;

use roleboard_core::AppError;
use serde::{Deserialize, Serialize};

/// Capabilities a role can grant.
///
/// The set is closed: a permission that is not one of these variants cannot be
/// constructed, so a role's grants never hold an unknown value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Allows reading managed resources.
    Read,
    /// Allows creating and editing managed resources.
    Write,
    /// Allows deleting managed resources.
    Delete,
    /// Allows administering user accounts.
    ManageUsers,
    /// Allows administering roles and their grants.
    ManageRoles,
}

impl Permission {
    /// Returns a stable storage value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
            Self::ManageUsers => "manage_users",
            Self::ManageRoles => "manage_roles",
        }
    }

    /// Returns all known permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
            Permission::Read,
            Permission::Write,
            Permission::Delete,
            Permission::ManageUsers,
            Permission::ManageRoles,
        ];

        ALL
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "read" => Ok(Self::Read),
            "write" => Ok(Self::Write),
            "delete" => Ok(Self::Delete),
            "manage_users" => Ok(Self::ManageUsers),
            "manage_roles" => Ok(Self::ManageRoles),
            _ => Err(AppError::Validation(format!(
                "unknown permission value '{value}'"
            ))),
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A duplicate-free collection of permissions.
///
/// Stored sorted, so equality is set equality regardless of the order grants
/// were attached in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionSet(Vec<Permission>);

impl PermissionSet {
    /// Creates an empty permission set.
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns true when the set holds the given permission.
    #[must_use]
    pub fn contains(&self, permission: Permission) -> bool {
        self.0.binary_search(&permission).is_ok()
    }

    /// Adds a permission; adding one already present changes nothing.
    pub fn insert(&mut self, permission: Permission) {
        if let Err(position) = self.0.binary_search(&permission) {
            self.0.insert(position, permission);
        }
    }

    /// Removes a permission; removing one not present changes nothing.
    pub fn remove(&mut self, permission: Permission) {
        if let Ok(position) = self.0.binary_search(&permission) {
            self.0.remove(position);
        }
    }

    /// Adds the permission when absent, removes it when present.
    pub fn toggle(&mut self, permission: Permission) {
        match self.0.binary_search(&permission) {
            Ok(position) => {
                self.0.remove(position);
            }
            Err(position) => self.0.insert(position, permission),
        }
    }

    /// Iterates the permissions in stable order.
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.0.iter().copied()
    }

    /// Returns the number of distinct permissions held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no permission is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(permissions: I) -> Self {
        let mut set = Self::new();
        for permission in permissions {
            set.insert(permission);
        }

        set
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use proptest::prelude::*;

    use super::{Permission, PermissionSet};

    #[test]
    fn permission_roundtrip_storage_value() {
        for permission in Permission::all() {
            let restored = Permission::from_str(permission.as_str());
            assert!(restored.is_ok_and(|restored| restored == *permission));
        }
    }

    #[test]
    fn unknown_permission_is_rejected() {
        let parsed = Permission::from_str("manage_everything");
        assert!(parsed.is_err());
    }

    #[test]
    fn permission_serializes_as_snake_case() {
        let encoded = serde_json::to_string(&Permission::ManageUsers);
        assert!(encoded.is_ok_and(|encoded| encoded == "\"manage_users\""));
    }

    #[test]
    fn set_deduplicates_on_construction() {
        let set: PermissionSet = [Permission::Read, Permission::Write, Permission::Read]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(Permission::Read));
        assert!(set.contains(Permission::Write));
    }

    #[test]
    fn set_equality_ignores_attachment_order() {
        let forward: PermissionSet = [Permission::Read, Permission::Delete].into_iter().collect();
        let backward: PermissionSet = [Permission::Delete, Permission::Read].into_iter().collect();
        assert_eq!(forward, backward);
    }

    #[test]
    fn toggling_on_then_off_restores_the_set() {
        let mut set: PermissionSet = [Permission::Read].into_iter().collect();
        set.toggle(Permission::Write);
        assert!(set.contains(Permission::Write));
        set.toggle(Permission::Write);

        let expected: PermissionSet = [Permission::Read].into_iter().collect();
        assert_eq!(set, expected);
    }

    fn arbitrary_permission() -> impl Strategy<Value = Permission> {
        prop::sample::select(Permission::all().to_vec())
    }

    proptest! {
        #[test]
        fn double_toggle_is_identity(
            initial in prop::collection::vec(arbitrary_permission(), 0..5),
            toggled in arbitrary_permission(),
        ) {
            let before: PermissionSet = initial.into_iter().collect();
            let mut after = before.clone();
            after.toggle(toggled);
            after.toggle(toggled);
            prop_assert_eq!(before, after);
        }

        #[test]
        fn insert_is_idempotent(
            initial in prop::collection::vec(arbitrary_permission(), 0..5),
            inserted in arbitrary_permission(),
        ) {
            let mut once: PermissionSet = initial.into_iter().collect();
            once.insert(inserted);
            let mut twice = once.clone();
            twice.insert(inserted);
            prop_assert_eq!(once, twice);
        }
    }
}
