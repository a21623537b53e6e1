use std::sync::Arc;

use roleboard_domain::{Role, RoleId, User, UserId};

/// An immutable view of both collections at one point in time.
///
/// Snapshots share their backing storage, so cloning one is cheap and a
/// snapshot taken before a mutation is unaffected by it.
#[derive(Debug, Clone)]
pub struct Snapshot {
    users: Arc<[User]>,
    roles: Arc<[Role]>,
}

impl Snapshot {
    /// Creates a snapshot with empty collections.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            users: Arc::from(Vec::new()),
            roles: Arc::from(Vec::new()),
        }
    }

    pub(crate) fn new(users: Vec<User>, roles: Vec<Role>) -> Self {
        Self {
            users: Arc::from(users),
            roles: Arc::from(roles),
        }
    }

    /// Returns the users in insertion order.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Returns the roles in insertion order.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Finds a user by identifier.
    #[must_use]
    pub fn find_user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id() == id)
    }

    /// Finds a role by identifier.
    #[must_use]
    pub fn find_role(&self, id: RoleId) -> Option<&Role> {
        self.roles.iter().find(|role| role.id() == id)
    }

    /// Counts the users whose account is active.
    ///
    /// Computed from this snapshot on every call, never cached.
    #[must_use]
    pub fn active_user_count(&self) -> usize {
        self.users.iter().filter(|user| user.is_active()).count()
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}
