//! Error handling for the playground HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use playground_authz::AuthError;
use serde::Serialize;
use thiserror::Error;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use uuid::Uuid;

const INTERNAL_MESSAGE: &str = "An internal server error occurred";

/// Standard error response format for all HTTP errors
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    pub trace_id: String,
    pub timestamp: String,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation error: {message}")]
    Validation {
        details: Vec<serde_json::Value>,
        code: String,
        message: String,
        tip: Option<String>,
    },

    #[error("not found: {message}")]
    NotFound {
        message: String,
        code: String,
        tip: Option<String>,
    },

    #[error("unauthorized: {message}")]
    Unauthorized {
        message: String,
        code: String,
        tip: Option<String>,
    },

    #[error("forbidden: {message}")]
    Forbidden {
        message: String,
        code: String,
        tip: Option<String>,
    },

    #[error("bad request: {message}")]
    BadRequest {
        message: String,
        code: String,
        tip: Option<String>,
    },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a validation error
    pub fn validation(details: Vec<serde_json::Value>, message: impl Into<String>) -> Self {
        Self::Validation {
            details,
            code: "validation_error".to_string(),
            message: message.into(),
            tip: None,
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            code: "not_found".to_string(),
            tip: None,
        }
    }

    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
            code: "unauthorized".to_string(),
            tip: None,
        }
    }

    /// Create a forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
            code: "forbidden".to_string(),
            tip: None,
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            code: "bad_request".to_string(),
            tip: None,
        }
    }

    /// Attach a hint telling the caller how to fix the request.
    ///
    /// Internal errors never carry a tip.
    pub fn with_tip(mut self, hint: impl Into<String>) -> Self {
        match &mut self {
            AppError::Validation { tip, .. }
            | AppError::NotFound { tip, .. }
            | AppError::Unauthorized { tip, .. }
            | AppError::Forbidden { tip, .. }
            | AppError::BadRequest { tip, .. } => *tip = Some(hint.into()),
            AppError::Internal(_) => {}
        }
        self
    }

    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Missing(_) => AppError::unauthorized(capitalize(&err.to_string())),
            AuthError::Mismatch(_) => AppError::forbidden(capitalize(&err.to_string())),
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4();
        let timestamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default();
        let status = self.status();

        let (error_code, message, details, tip) = match self {
            AppError::Validation {
                details,
                code,
                message,
                tip,
            } => (code, message, details, tip),
            AppError::NotFound { message, code, tip }
            | AppError::Unauthorized { message, code, tip }
            | AppError::Forbidden { message, code, tip }
            | AppError::BadRequest { message, code, tip } => (code, message, Vec::new(), tip),
            AppError::Internal(e) => {
                tracing::error!(error_id = %error_id, error = ?e, "unhandled error");
                (
                    "internal_error".to_string(),
                    INTERNAL_MESSAGE.to_string(),
                    Vec::new(),
                    None,
                )
            }
        };

        tracing::error!(
            error_id = %error_id,
            error_code = %error_code,
            status_code = %status.as_u16(),
            "Request error"
        );

        let body = ErrorBody {
            success: false,
            error: message,
            code: error_code,
            details,
            tip,
            trace_id: error_id.to_string(),
            timestamp,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_validation_error() {
        let details = vec![serde_json::json!({"field": "title", "error": "required"})];
        let error = AppError::validation(details.clone(), "Validation failed");

        match error {
            AppError::Validation {
                details: d,
                code,
                message,
                tip,
            } => {
                assert_eq!(d, details);
                assert_eq!(code, "validation_error");
                assert_eq!(message, "Validation failed");
                assert!(tip.is_none());
            }
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_error_response_mapping() {
        let error = AppError::not_found("Resource not found");
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::validation(vec![], "bad").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_auth_errors_map_to_401_and_403() {
        let missing: AppError = AuthError::Missing("API key").into();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let wrong: AppError = AuthError::Mismatch("bearer token").into();
        assert_eq!(wrong.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let internal_error = anyhow::anyhow!("lock poisoned");
        let response = AppError::Internal(internal_error).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], INTERNAL_MESSAGE);
        assert_eq!(body["code"], "internal_error");
    }

    #[tokio::test]
    async fn test_error_response_format() {
        let response = AppError::not_found("Book not found")
            .with_tip("List books with GET /api/books")
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Book not found");
        assert_eq!(body["code"], "not_found");
        assert_eq!(body["tip"], "List books with GET /api/books");
        assert!(body.get("details").is_none());
        assert!(Uuid::parse_str(body["trace_id"].as_str().unwrap()).is_ok());
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    }
}
