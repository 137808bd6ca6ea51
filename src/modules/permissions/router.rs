use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    check_permission, create_preset, delete_preset, get_me, get_preset, get_presets, get_role,
    get_roles, update_preset, validate_permission,
};

pub fn init_permissions_router() -> Router<AppState> {
    Router::new()
        // Role table
        .route("/roles", get(get_roles))
        .route("/roles/{role}", get(get_role))
        // Caller
        .route("/me", get(get_me))
        .route("/check", get(check_permission))
        // Presets
        .route("/presets", get(get_presets).post(create_preset))
        .route(
            "/presets/{id}",
            get(get_preset).put(update_preset).delete(delete_preset),
        )
}

/// Routes that inspect other roles. Mounted behind `require_manager`.
pub fn init_permission_audit_router() -> Router<AppState> {
    Router::new().route("/validate", get(validate_permission))
}
