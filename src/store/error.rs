use playground_http::AppError;
use serde_json::json;
use thiserror::Error;

/// Failures raised by [`Store`](super::Store) operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No entry carries the requested identifier. `id` is kept as given so
    /// unparsable path segments report what the caller sent.
    #[error("{kind} with id {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("{message}")]
    Validation {
        message: String,
        missing: Vec<&'static str>,
    },
}

impl StoreError {
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub(crate) fn missing_fields(kind: &'static str, missing: Vec<&'static str>) -> Self {
        Self::Validation {
            message: format!("{kind} requires: {}", missing.join(", ")),
            missing,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { kind, .. } => AppError::not_found(err.to_string()).with_tip(
                format!("List the available {}s to find a valid id", kind.to_lowercase()),
            ),
            StoreError::Validation { message, missing } => {
                let details = missing
                    .iter()
                    .map(|field| json!({ "field": field, "error": "required" }))
                    .collect();
                let tip = format!(
                    "Include {} in the JSON body",
                    missing
                        .iter()
                        .map(|field| format!("\"{field}\""))
                        .collect::<Vec<_>>()
                        .join(" and ")
                );
                AppError::validation(details, message).with_tip(tip)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn not_found_maps_to_404() {
        let error: AppError = StoreError::not_found("Book", 42).into();
        assert_eq!(error.status(), StatusCode::NOT_FOUND);
        assert_eq!(error.to_string(), "not found: Book with id 42 not found");
    }

    #[test]
    fn validation_maps_to_400_with_field_details() {
        let error: AppError = StoreError::missing_fields("Book", vec!["title", "author"]).into();
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        match error {
            AppError::Validation { details, tip, .. } => {
                assert_eq!(details.len(), 2);
                assert_eq!(details[0]["field"], "title");
                assert_eq!(tip.as_deref(), Some("Include \"title\" and \"author\" in the JSON body"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
