//! Roleboard console composition root.
//!
//! Owns the single [`AdminStore`] for the session, wires a logging observer
//! in place of the navigation shell, seeds the user directory, and walks the
//! role lifecycle end to end.

#![forbid(unsafe_code)]

use roleboard_core::{AppError, AppResult};
use roleboard_domain::{Permission, User, UserId};
use roleboard_store::{AdminStore, RoleDraft};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const SEED_USERS: &[(&str, &str, &str, bool)] = &[
    (
        "a2c8ea5f-4f39-4724-97f5-932f97f54f76",
        "Ada Lovelace",
        "ada@roleboard.local",
        true,
    ),
    (
        "96d11e90-7403-4654-9727-cb1043f8bd31",
        "Grace Hopper",
        "grace@roleboard.local",
        true,
    ),
    (
        "3f2534e1-9af0-4d9f-8db7-5a4f8f2f10c2",
        "Edsger Dijkstra",
        "edsger@roleboard.local",
        false,
    ),
];

fn main() -> AppResult<()> {
    init_tracing();

    let store = AdminStore::new();

    // Stand-in for the header's active-user badge: recomputed from every
    // published snapshot, never cached.
    let shell = store.subscribe(|snapshot| {
        info!(
            active_users = snapshot.active_user_count(),
            users = snapshot.users().len(),
            roles = snapshot.roles().len(),
            "snapshot published"
        );
    });

    store.set_users(seed_users()?);

    let mut draft = RoleDraft::new();
    draft.set_name("Editor");
    draft.set_description("can edit content");
    draft.toggle_permission(Permission::Read);
    draft.toggle_permission(Permission::Write);
    let editor = draft.submit(&store)?;
    info!(role_id = %editor.id(), "created role '{}'", editor.name());

    let mut revision = RoleDraft::edit(&editor);
    revision.set_description("can edit and delete content");
    revision.toggle_permission(Permission::Delete);
    let editor = revision.submit(&store)?;
    info!(
        role_id = %editor.id(),
        grants = editor.permissions().len(),
        "updated role '{}'",
        editor.name()
    );

    let deactivated = parse_seed_id(SEED_USERS[1].0)?;
    if let Some(user) = store.snapshot().find_user(deactivated).cloned() {
        store.update_user(user.with_active(false));
    }

    store.delete_role(editor.id());
    store.unsubscribe(shell);

    let snapshot = store.snapshot();
    let report = serde_json::to_string_pretty(&serde_json::json!({
        "users": snapshot.users(),
        "roles": snapshot.roles(),
        "active_user_count": snapshot.active_user_count(),
    }))
    .map_err(|error| AppError::Internal(format!("failed to encode snapshot: {error}")))?;
    println!("{report}");

    Ok(())
}

fn seed_users() -> AppResult<Vec<User>> {
    SEED_USERS
        .iter()
        .map(|(id, name, email, is_active)| {
            User::with_id(parse_seed_id(id)?, *name, *email, *is_active)
        })
        .collect()
}

fn parse_seed_id(value: &str) -> AppResult<UserId> {
    let parsed = Uuid::parse_str(value)
        .map_err(|error| AppError::Internal(format!("invalid seed uuid '{value}': {error}")))?;
    Ok(UserId::from_uuid(parsed))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
