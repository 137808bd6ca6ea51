use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Configuration errors raised when a value from outside the type system
/// does not name a known role, module or action.
///
/// Authorization negatives are never reported through this type; they are
/// plain `false` results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PermissionError {
    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("unknown module: {0}")]
    UnknownModule(String),

    #[error("unknown action: {0}")]
    UnknownAction(String),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: String) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, anyhow::anyhow!(message))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized(message: String) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message))
    }

    pub fn forbidden(message: String) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(message))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.error.to_string()
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_error_messages() {
        assert_eq!(
            PermissionError::UnknownRole("dj".to_string()).to_string(),
            "unknown role: dj"
        );
        assert_eq!(
            PermissionError::UnknownModule("casino".to_string()).to_string(),
            "unknown module: casino"
        );
        assert_eq!(
            PermissionError::UnknownAction("delete".to_string()).to_string(),
            "unknown action: delete"
        );
    }

    #[test]
    fn test_constructors_set_status() {
        assert_eq!(
            AppError::forbidden("nope".to_string()).status,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::unauthorized("who".to_string()).status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::not_found(PermissionError::UnknownRole("x".to_string())).status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::unprocessable(anyhow::anyhow!("bad")).status,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_question_mark_defaults_to_internal() {
        fn fails() -> Result<(), AppError> {
            let outcome: Result<(), PermissionError> =
                Err(PermissionError::UnknownAction("x".to_string()));
            outcome?;
            Ok(())
        }

        let err = fails().unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error.to_string(), "unknown action: x");
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::bad_request(anyhow::anyhow!("broken")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
