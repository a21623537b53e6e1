//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod role;
mod security;
mod user;

pub use role::{Role, RoleId};
pub use security::{Permission, PermissionSet};
pub use user::{EmailAddress, User, UserId};
