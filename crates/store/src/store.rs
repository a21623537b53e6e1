use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use roleboard_core::{AppError, AppResult};
use roleboard_domain::{Role, RoleId, User, UserId};
use tracing::debug;

use crate::Snapshot;

type ObserverCallback = Arc<dyn Fn(&Snapshot) + Send + Sync>;

/// Handle identifying one observer subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

struct StoreState {
    snapshot: Snapshot,
    observers: Vec<(SubscriberId, ObserverCallback)>,
    next_subscriber: u64,
}

/// The authoritative in-memory store of users and roles.
///
/// One lock guards both collections and the observer list, so cross-field
/// consistency holds between a mutation and the reads it triggers. Every
/// mutation swaps in a fresh [`Snapshot`] and then publishes it to all
/// subscribed observers; callbacks run after the lock is released, so an
/// observer may read the store re-entrantly.
///
/// Adding an entity whose id is already present fails with
/// [`AppError::Conflict`] and leaves the store unchanged. Updates and deletes
/// that match no entity are silent no-ops (the unchanged snapshot is still
/// re-published).
pub struct AdminStore {
    state: Mutex<StoreState>,
}

impl AdminStore {
    /// Creates a store with empty collections and no observers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState {
                snapshot: Snapshot::empty(),
                observers: Vec::new(),
                next_subscriber: 0,
            }),
        }
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.state().snapshot.clone()
    }

    /// Registers an observer called with the post-mutation snapshot after
    /// every mutation, in subscription order.
    pub fn subscribe(&self, observer: impl Fn(&Snapshot) + Send + Sync + 'static) -> SubscriberId {
        let mut state = self.state();
        let id = SubscriberId(state.next_subscriber);
        state.next_subscriber += 1;
        state.observers.push((id, Arc::new(observer)));
        id
    }

    /// Removes an observer; returns false when the id was not subscribed.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut state = self.state();
        let before = state.observers.len();
        state.observers.retain(|(subscriber, _)| *subscriber != id);
        state.observers.len() < before
    }

    /// Replaces the entire users collection wholesale.
    pub fn set_users(&self, users: Vec<User>) {
        debug!(count = users.len(), "users collection replaced");
        self.mutate(|snapshot| Snapshot::new(users, snapshot.roles().to_vec()));
    }

    /// Replaces the entire roles collection wholesale.
    pub fn set_roles(&self, roles: Vec<Role>) {
        debug!(count = roles.len(), "roles collection replaced");
        self.mutate(|snapshot| Snapshot::new(snapshot.users().to_vec(), roles));
    }

    /// Appends a user, preserving prior order with the new entry last.
    pub fn add_user(&self, user: User) -> AppResult<()> {
        self.try_mutate(|snapshot| {
            if snapshot.find_user(user.id()).is_some() {
                return Err(AppError::Conflict(format!(
                    "user '{}' already exists",
                    user.id()
                )));
            }

            debug!(user_id = %user.id(), "user added");
            let mut users = snapshot.users().to_vec();
            users.push(user);
            Ok(Snapshot::new(users, snapshot.roles().to_vec()))
        })
    }

    /// Replaces the user with a matching id in place, preserving its
    /// position. Silent no-op when no user matches.
    pub fn update_user(&self, user: User) {
        debug!(user_id = %user.id(), "user updated");
        self.mutate(|snapshot| {
            let users: Vec<User> = snapshot
                .users()
                .iter()
                .map(|existing| {
                    if existing.id() == user.id() {
                        user.clone()
                    } else {
                        existing.clone()
                    }
                })
                .collect();

            Snapshot::new(users, snapshot.roles().to_vec())
        });
    }

    /// Removes the user with a matching id. Idempotent: a second call with
    /// the same id is a no-op.
    pub fn delete_user(&self, id: UserId) {
        debug!(user_id = %id, "user deleted");
        self.mutate(|snapshot| {
            let users: Vec<User> = snapshot
                .users()
                .iter()
                .filter(|user| user.id() != id)
                .cloned()
                .collect();

            Snapshot::new(users, snapshot.roles().to_vec())
        });
    }

    /// Appends a role, preserving prior order with the new entry last.
    pub fn add_role(&self, role: Role) -> AppResult<()> {
        self.try_mutate(|snapshot| {
            if snapshot.find_role(role.id()).is_some() {
                return Err(AppError::Conflict(format!(
                    "role '{}' already exists",
                    role.id()
                )));
            }

            debug!(role_id = %role.id(), name = role.name().as_str(), "role added");
            let mut roles = snapshot.roles().to_vec();
            roles.push(role);
            Ok(Snapshot::new(snapshot.users().to_vec(), roles))
        })
    }

    /// Replaces the role with a matching id in place, preserving its
    /// position. Silent no-op when no role matches.
    pub fn update_role(&self, role: Role) {
        debug!(role_id = %role.id(), "role updated");
        self.mutate(|snapshot| {
            let roles: Vec<Role> = snapshot
                .roles()
                .iter()
                .map(|existing| {
                    if existing.id() == role.id() {
                        role.clone()
                    } else {
                        existing.clone()
                    }
                })
                .collect();

            Snapshot::new(snapshot.users().to_vec(), roles)
        });
    }

    /// Removes the role with a matching id. Idempotent: a second call with
    /// the same id is a no-op.
    pub fn delete_role(&self, id: RoleId) {
        debug!(role_id = %id, "role deleted");
        self.mutate(|snapshot| {
            let roles: Vec<Role> = snapshot
                .roles()
                .iter()
                .filter(|role| role.id() != id)
                .cloned()
                .collect();

            Snapshot::new(snapshot.users().to_vec(), roles)
        });
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn mutate(&self, build: impl FnOnce(&Snapshot) -> Snapshot) {
        // Infallible builders cannot conflict, so the result carries no error.
        let _ = self.try_mutate(|snapshot| Ok(build(snapshot)));
    }

    /// Builds the next snapshot under the lock, swaps it in, and notifies
    /// observers with the lock released. A failed build leaves the store
    /// untouched and notifies no one.
    fn try_mutate(&self, build: impl FnOnce(&Snapshot) -> AppResult<Snapshot>) -> AppResult<()> {
        let (next, observers) = {
            let mut state = self.state();
            let next = build(&state.snapshot)?;
            state.snapshot = next.clone();
            let observers: Vec<ObserverCallback> = state
                .observers
                .iter()
                .map(|(_, callback)| Arc::clone(callback))
                .collect();
            (next, observers)
        };

        for callback in observers {
            callback(&next);
        }

        Ok(())
    }
}

impl Default for AdminStore {
    fn default() -> Self {
        Self::new()
    }
}
