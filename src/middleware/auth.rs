use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::warn;

use barflow_auth::{Claims, verify_token};
use barflow_core::AppError;
use barflow_models::{EmployeeRole, ModulePermissions, UserId};

use crate::modules::permissions::{PresetManager, UserPermissionContext};
use crate::state::AppState;

/// Extractor that validates the bearer token and resolves the employee's role.
///
/// Missing or invalid tokens are rejected with 401. A valid token whose role
/// key is not a known role is rejected with 403.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub claims: Claims,
    pub role: EmployeeRole,
}

impl AuthUser {
    pub fn from_claims(claims: Claims) -> Result<Self, AppError> {
        let role = claims.employee_role().map_err(|e| {
            warn!(user_id = %claims.sub, role = %claims.role, "Token carries an unknown role");
            AppError::forbidden(format!("Access denied. {}", e))
        })?;

        Ok(Self { claims, role })
    }

    /// Get the user ID from the subject claim
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.claims
            .sub
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid user ID in token".to_string()))
    }

    pub fn email(&self) -> &str {
        &self.claims.email
    }

    /// The per-user override carried by the token, if any.
    pub fn overrides(&self) -> Option<&ModulePermissions> {
        self.claims.permissions.as_ref()
    }

    pub fn permission_context<'a>(
        &self,
        manager: &'a PresetManager,
    ) -> Result<UserPermissionContext<'a>, AppError> {
        Ok(manager.create_user_permission_context(
            self.user_id()?,
            self.role,
            self.claims.permissions.clone(),
        ))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized("Invalid authorization header format".to_string())
        })?;

        let claims = verify_token(token, &state.jwt_config)?;

        AuthUser::from_claims(claims)
    }
}
