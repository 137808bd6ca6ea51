use axum::body::Body;
use axum::http::{Request, StatusCode};
use barflow::modules::permissions::PresetManager;
use barflow::router::init_router;
use barflow::state::AppState;
use barflow_auth::{Claims, create_access_token};
use barflow_config::{CorsConfig, JwtConfig};
use barflow_models::{EmployeeRole, ModulePermissions};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-key-for-testing-purposes".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn setup_test_state() -> AppState {
    setup_test_state_with(PresetManager::new())
}

pub fn setup_test_state_with(presets: PresetManager) -> AppState {
    AppState::new(
        presets,
        test_jwt_config(),
        CorsConfig::from_origins("http://localhost:5173"),
    )
}

pub fn setup_test_app() -> axum::Router {
    init_router(setup_test_state())
}

#[allow(dead_code)]
pub fn setup_test_app_with(presets: PresetManager) -> axum::Router {
    init_router(setup_test_state_with(presets))
}

pub fn generate_unique_email() -> String {
    format!("staff-{}@bar.test", Uuid::new_v4())
}

pub fn token_for(role: EmployeeRole) -> String {
    token_with_overrides(role, None)
}

pub fn token_with_overrides(role: EmployeeRole, overrides: Option<ModulePermissions>) -> String {
    create_access_token(
        Uuid::new_v4(),
        &generate_unique_email(),
        role,
        overrides,
        &test_jwt_config(),
    )
    .unwrap()
}

/// A correctly signed token carrying a role key this build does not know.
#[allow(dead_code)]
pub fn token_for_role_key(role: &str) -> String {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        email: generate_unique_email(),
        role: role.to_string(),
        permissions: None,
        exp: now + 3600,
        iat: now,
    };
    barflow_auth::jwt::encode_claims(&claims, &test_jwt_config()).unwrap()
}

/// Sends one request and returns the status with the parsed JSON body.
/// Empty bodies come back as `Value::Null`, non-JSON bodies as a string.
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, body)
}
