use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::warn;

use barflow_core::AppError;
use barflow_models::{
    CreatePresetDto, EmployeeRole, ModulePermissions, PermissionPreset, PresetId,
    RolePermissionConfig, UpdatePresetDto,
};

use crate::middleware::auth::AuthUser;
use crate::middleware::permission::RequireSettingsAdmin;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::PresetManager;
use super::model::{
    CheckQuery, CheckResponse, MeResponse, ModuleAccess, PermissionValidation, ValidateQuery,
};
use super::utils;

/// Rejects override sets that grant a write capability without view.
fn ensure_consistent(
    permissions: &ModulePermissions,
    base_role: EmployeeRole,
) -> Result<(), AppError> {
    let validation = utils::validate_permission_configuration(permissions, base_role);
    if validation.is_valid {
        return Ok(());
    }

    warn!(errors = ?validation.errors, "Rejected inconsistent preset permissions");
    Err(AppError::unprocessable(anyhow!(
        "{}",
        validation.errors.join("; ")
    )))
}

/// Runs a registry mutation on the blocking pool. Mutations save through
/// the preset store, which may write to disk.
async fn mutate_registry<T, F>(state: &AppState, mutation: F) -> Result<T, AppError>
where
    F: FnOnce(&PresetManager) -> T + Send + 'static,
    T: Send + 'static,
{
    let presets = Arc::clone(&state.presets);
    tokio::task::spawn_blocking(move || mutation(&presets))
        .await
        .map_err(|e| AppError::internal_error(format!("Task join error: {}", e)))
}

fn preset_not_found(id: &PresetId) -> AppError {
    AppError::not_found(anyhow!("Custom preset not found: {}", id))
}

// ============ Role Endpoints ============

pub async fn get_roles(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Json<Vec<RolePermissionConfig>> {
    let roles = state.presets.role_configs().into_iter().cloned().collect();
    Json(roles)
}

pub async fn get_role(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(role): Path<String>,
) -> Result<Json<RolePermissionConfig>, AppError> {
    let config = state
        .presets
        .role_config_by_key(&role)
        .map_err(AppError::not_found)?;
    Ok(Json(config.clone()))
}

// ============ Caller Endpoints ============

pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<MeResponse>, AppError> {
    let ctx = auth_user.permission_context(&state.presets)?;

    let accessible_modules = ctx
        .accessible_modules()
        .into_iter()
        .map(|module| ModuleAccess {
            module,
            display_name: module.display_name().to_string(),
            permission: ctx.permission(module),
        })
        .collect();

    Ok(Json(MeResponse {
        user_id: ctx.user_id,
        email: auth_user.email().to_string(),
        role: ctx.role,
        hierarchy: state.presets.role_hierarchy(ctx.role),
        is_customized: ctx.is_customized,
        summary: utils::generate_permission_summary(&ctx.permissions),
        accessible_modules,
        manageable_roles: ctx.manageable_roles(),
        permissions: ctx.permissions,
    }))
}

pub async fn check_permission(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<CheckQuery>,
) -> Json<CheckResponse> {
    let allowed = utils::has_permission(
        &state.presets,
        auth_user.role,
        query.module,
        query.action,
        auth_user.overrides(),
    );

    Json(CheckResponse {
        module: query.module,
        action: query.action,
        allowed,
    })
}

pub async fn validate_permission(
    State(state): State<AppState>,
    Query(query): Query<ValidateQuery>,
) -> Json<PermissionValidation> {
    Json(
        state
            .presets
            .validate_permission(&query.role, query.module, query.action),
    )
}

// ============ Preset Endpoints ============

pub async fn get_presets(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Json<Vec<PermissionPreset>> {
    Json(state.presets.presets())
}

pub async fn get_preset(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<PermissionPreset>, AppError> {
    let id = PresetId::from(id);
    let preset = state
        .presets
        .preset_by_id(&id)
        .ok_or_else(|| AppError::not_found(anyhow!("Preset not found: {}", id)))?;
    Ok(Json(preset))
}

pub async fn create_preset(
    State(state): State<AppState>,
    RequireSettingsAdmin(_auth_user): RequireSettingsAdmin,
    ValidatedJson(dto): ValidatedJson<CreatePresetDto>,
) -> Result<(StatusCode, Json<PermissionPreset>), AppError> {
    ensure_consistent(&dto.permissions, dto.base_role)?;

    let preset = mutate_registry(&state, move |presets| {
        presets.create_custom_preset(&dto.name, &dto.description, dto.base_role, dto.permissions)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(preset)))
}

pub async fn update_preset(
    State(state): State<AppState>,
    RequireSettingsAdmin(_auth_user): RequireSettingsAdmin,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdatePresetDto>,
) -> Result<Json<PermissionPreset>, AppError> {
    let id = PresetId::from(id);

    if let Some(permissions) = &dto.permissions {
        let base_role = match dto.base_role {
            Some(role) => role,
            None => {
                state
                    .presets
                    .preset_by_id(&id)
                    .ok_or_else(|| preset_not_found(&id))?
                    .base_role
            }
        };
        ensure_consistent(permissions, base_role)?;
    }

    let target = id.clone();
    let preset = mutate_registry(&state, move |presets| {
        presets.update_custom_preset(&target, dto)
    })
    .await?
    .ok_or_else(|| preset_not_found(&id))?;
    Ok(Json(preset))
}

pub async fn delete_preset(
    State(state): State<AppState>,
    RequireSettingsAdmin(_auth_user): RequireSettingsAdmin,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = PresetId::from(id);
    let target = id.clone();
    let deleted = mutate_registry(&state, move |presets| {
        presets.delete_custom_preset(&target)
    })
    .await?;
    if !deleted {
        return Err(preset_not_found(&id));
    }
    Ok(StatusCode::NO_CONTENT)
}
