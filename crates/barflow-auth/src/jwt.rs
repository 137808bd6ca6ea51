//! JWT (JSON Web Token) utilities for authentication.
//!
//! Access tokens embed the employee's role key and optional permission
//! override so that authorization needs no profile lookup per request.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use barflow_config::JwtConfig;
use barflow_core::AppError;
use barflow_models::{EmployeeRole, ModulePermissions};

use crate::claims::Claims;

/// Creates an access token for `user_id` acting as `role`.
///
/// # Errors
///
/// Returns an internal error if token encoding fails (e.g., invalid secret key).
pub fn create_access_token(
    user_id: Uuid,
    email: &str,
    role: EmployeeRole,
    permissions: Option<ModulePermissions>,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role: role.as_str().to_string(),
        permissions,
        exp,
        iat: now,
    };

    encode_claims(&claims, jwt_config)
}

/// Signs arbitrary claims. Used by [`create_access_token`] and by callers
/// that need to mint tokens for role keys outside the enumeration.
pub fn encode_claims(claims: &Claims, jwt_config: &JwtConfig) -> Result<String, AppError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies an access token and returns the embedded claims.
///
/// # Errors
///
/// Returns an unauthorized error if the signature is invalid, the token
/// has expired, or it is malformed.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token".to_string()))
}
