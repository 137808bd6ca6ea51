//! Module-permission guards for Axum.
//!
//! Three ways to protect a handler:
//! 1. Extractors generated by [`require_module_permission!`](crate::require_module_permission)
//! 2. [`check_module_permission`] / [`check_can_manage`] inside a handler
//! 3. The [`require_manager`] route layer for whole routers

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use barflow_core::AppError;
use barflow_models::{AccessLevel, EmployeeRole, PermissionAction, SystemModule};

use crate::middleware::auth::AuthUser;
use crate::modules::permissions::{PresetManager, utils};
use crate::state::AppState;

/// Fails with 403 unless the caller holds `action` on `module`, taking the
/// token's override into account.
pub fn check_module_permission(
    manager: &PresetManager,
    auth_user: &AuthUser,
    module: SystemModule,
    action: PermissionAction,
) -> Result<(), AppError> {
    if utils::has_permission(manager, auth_user.role, module, action, auth_user.overrides()) {
        return Ok(());
    }

    warn!(
        user_id = %auth_user.claims.sub,
        role = %auth_user.role,
        module = %module,
        action = %action,
        "Permission denied"
    );
    Err(AppError::forbidden(format!(
        "Access denied. Missing required permission: {}:{}",
        module, action
    )))
}

/// Fails with 403 unless the caller's role may manage `target`.
pub fn check_can_manage(
    manager: &PresetManager,
    auth_user: &AuthUser,
    target: EmployeeRole,
) -> Result<(), AppError> {
    if utils::can_manage_user(manager, auth_user.role, target) {
        return Ok(());
    }

    warn!(
        user_id = %auth_user.claims.sub,
        role = %auth_user.role,
        target = %target,
        "Management denied"
    );
    Err(AppError::forbidden(format!(
        "Access denied. {} cannot manage {}",
        auth_user.role, target
    )))
}

/// Generates an extractor that authenticates the caller and requires one
/// module permission.
#[macro_export]
macro_rules! require_module_permission {
    ($name:ident, $module:expr, $action:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = barflow_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = <$crate::middleware::auth::AuthUser as axum::extract::FromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;

                $crate::middleware::permission::check_module_permission(
                    &state.presets,
                    &auth_user,
                    $module,
                    $action,
                )?;

                Ok($name(auth_user))
            }
        }
    };
}

require_module_permission!(
    RequireSettingsAdmin,
    SystemModule::Settings,
    PermissionAction::Administer
);

/// Route layer that admits roles whose access level is manager or above.
///
/// ```rust,ignore
/// let audit_routes = Router::new()
///     .route("/validate", get(validate_permission))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_manager));
/// ```
pub async fn require_manager(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let auth_user = match AuthUser::from_request_parts(&mut parts, &state).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    let access_level = state.presets.role_config(auth_user.role).access_level;
    if access_level < AccessLevel::Manager {
        warn!(
            user_id = %auth_user.claims.sub,
            role = %auth_user.role,
            "Manager access required"
        );
        return AppError::forbidden(
            "Access denied. Manager privileges required.".to_string(),
        )
        .into_response();
    }

    next.run(Request::from_parts(parts, body)).await
}
