//! In-memory RBAC state store and its collaborator contracts.
//!
//! [`AdminStore`] owns the canonical collections of users and roles for one
//! running session. Every mutation produces a fresh immutable [`Snapshot`]
//! that is published synchronously to subscribed observers; [`RoleDraft`]
//! captures the role-editor collaborator's side of the contract.

#![forbid(unsafe_code)]

mod editor;
mod snapshot;
mod store;

pub use editor::RoleDraft;
pub use snapshot::Snapshot;
pub use store::{AdminStore, SubscriberId};
