use roleboard_core::{AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::PermissionSet;

/// Unique identifier for a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleId(Uuid);

impl RoleId {
    /// Creates a new random role identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a role identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RoleId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A named, described bundle of permissions.
///
/// The identifier is assigned at creation and never changes; the remaining
/// fields are replaced wholesale when the role is edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    id: RoleId,
    name: NonEmptyString,
    description: String,
    permissions: PermissionSet,
}

impl Role {
    /// Creates a role with a fresh identifier and validated fields.
    ///
    /// The name must not be empty or whitespace; the description must be
    /// present but may be empty text.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        permissions: PermissionSet,
    ) -> AppResult<Self> {
        Self::with_id(RoleId::new(), name, description, permissions)
    }

    /// Creates a role under a caller-supplied identifier.
    pub fn with_id(
        id: RoleId,
        name: impl Into<String>,
        description: impl Into<String>,
        permissions: PermissionSet,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            description: description.into(),
            permissions,
        })
    }

    /// Returns the stable role identifier.
    #[must_use]
    pub fn id(&self) -> RoleId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the description text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the granted permissions.
    #[must_use]
    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }
}

#[cfg(test)]
mod tests {
    use crate::{Permission, PermissionSet, Role, RoleId};

    #[test]
    fn role_rejects_empty_name() {
        let role = Role::new("", "can edit", PermissionSet::new());
        assert!(role.is_err());
    }

    #[test]
    fn role_accepts_empty_description() {
        let role = Role::new("Editor", "", PermissionSet::new());
        assert!(role.is_ok_and(|role| role.description().is_empty()));
    }

    #[test]
    fn with_id_keeps_the_supplied_identifier() {
        let id = RoleId::new();
        let permissions: PermissionSet = [Permission::Read].into_iter().collect();
        let role = Role::with_id(id, "Viewer", "read-only access", permissions);
        assert!(role.is_ok_and(|role| role.id() == id));
    }
}
