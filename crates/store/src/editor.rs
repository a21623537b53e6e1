use roleboard_core::{AppError, AppResult};
use roleboard_domain::{Permission, PermissionSet, Role};

use crate::AdminStore;

/// The role editor's working state: either a blank draft for a new role or
/// the editable fields of an existing one.
///
/// Field edits accumulate on the draft; nothing reaches the store until
/// [`RoleDraft::submit`]. On the edit path the draft is merged over the
/// original role before the single whole-entity update call, so the store
/// never receives a partial entity. Fresh identifiers are generated here, on
/// the create path — the store never generates them.
#[derive(Debug, Clone)]
pub struct RoleDraft {
    existing: Option<Role>,
    name: String,
    description: String,
    permissions: PermissionSet,
}

impl RoleDraft {
    /// Opens a blank draft for a new role.
    #[must_use]
    pub fn new() -> Self {
        Self {
            existing: None,
            name: String::new(),
            description: String::new(),
            permissions: PermissionSet::new(),
        }
    }

    /// Opens a draft pre-filled from an existing role.
    #[must_use]
    pub fn edit(role: &Role) -> Self {
        Self {
            existing: Some(role.clone()),
            name: role.name().as_str().to_owned(),
            description: role.description().to_owned(),
            permissions: role.permissions().clone(),
        }
    }

    /// Replaces the draft name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replaces the draft description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Grants the permission when absent, revokes it when present.
    pub fn toggle_permission(&mut self, permission: Permission) {
        self.permissions.toggle(permission);
    }

    /// Returns the draft's current permissions.
    #[must_use]
    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    /// Validates the draft and applies it to the store.
    ///
    /// A draft opened blank becomes an `add_role` under a freshly generated
    /// identifier; a draft opened from an existing role becomes an
    /// `update_role` keeping the original identifier. An empty name is
    /// rejected before any store call.
    pub fn submit(self, store: &AdminStore) -> AppResult<Role> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation(
                "role name must not be empty".to_owned(),
            ));
        }

        match self.existing {
            Some(original) => {
                let updated =
                    Role::with_id(original.id(), self.name, self.description, self.permissions)?;
                store.update_role(updated.clone());
                Ok(updated)
            }
            None => {
                let created = Role::new(self.name, self.description, self.permissions)?;
                store.add_role(created.clone())?;
                Ok(created)
            }
        }
    }
}

impl Default for RoleDraft {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use roleboard_domain::{Permission, PermissionSet, Role};

    use super::RoleDraft;
    use crate::AdminStore;

    fn editor_role() -> Role {
        let permissions: PermissionSet = [Permission::Read].into_iter().collect();
        match Role::new("Editor", "can edit", permissions) {
            Ok(role) => role,
            Err(error) => panic!("test role must be valid: {error}"),
        }
    }

    #[test]
    fn blank_draft_creates_a_role_with_a_fresh_id() {
        let store = AdminStore::new();
        let mut draft = RoleDraft::new();
        draft.set_name("Editor");
        draft.set_description("can edit");
        draft.toggle_permission(Permission::Read);
        draft.toggle_permission(Permission::Write);

        let created = draft.submit(&store);
        assert!(created.is_ok());
        if let Ok(created) = created {
            let snapshot = store.snapshot();
            assert!(snapshot.find_role(created.id()).is_some());
            assert_eq!(snapshot.roles().len(), 1);
        }
    }

    #[test]
    fn empty_name_is_rejected_before_any_store_call() {
        let store = AdminStore::new();
        let mut draft = RoleDraft::new();
        draft.set_name("   ");

        assert!(draft.submit(&store).is_err());
        assert!(store.snapshot().roles().is_empty());
    }

    #[test]
    fn edit_draft_keeps_the_original_id() {
        let store = AdminStore::new();
        let original = editor_role();
        assert!(store.add_role(original.clone()).is_ok());

        let mut draft = RoleDraft::edit(&original);
        draft.set_description("can edit and delete");
        draft.toggle_permission(Permission::Delete);

        let updated = draft.submit(&store);
        assert!(updated.is_ok_and(|updated| updated.id() == original.id()));

        let snapshot = store.snapshot();
        assert_eq!(
            snapshot
                .find_role(original.id())
                .map(|role| role.description().to_owned()),
            Some("can edit and delete".to_owned())
        );
    }

    #[test]
    fn toggling_a_permission_on_then_off_restores_the_original_grants() {
        let original = editor_role();
        let mut draft = RoleDraft::edit(&original);
        draft.toggle_permission(Permission::Write);
        draft.toggle_permission(Permission::Write);

        assert_eq!(draft.permissions(), original.permissions());
    }

    #[test]
    fn untouched_edit_draft_submits_the_role_unchanged() {
        let store = AdminStore::new();
        let original = editor_role();
        assert!(store.add_role(original.clone()).is_ok());

        let submitted = RoleDraft::edit(&original).submit(&store);
        assert!(submitted.is_ok_and(|submitted| submitted == original));
        assert_eq!(store.snapshot().roles(), &[original]);
    }
}
