//! Extractors that reject with the JSON error envelope instead of plain text.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use crate::error::AppError;

/// JSON body extractor; malformed or missing bodies become a 400 [`AppError`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                let tip = rejection_tip(&rejection);
                Err(AppError::bad_request(rejection.body_text()).with_tip(tip))
            }
        }
    }
}

fn rejection_tip(rejection: &JsonRejection) -> &'static str {
    match rejection {
        JsonRejection::JsonDataError(_) => {
            "The JSON is well formed but a field has the wrong type; check the field named in the error"
        }
        JsonRejection::JsonSyntaxError(_) => "The body is not valid JSON; check quotes, commas and braces",
        _ => "Send a JSON body with the header Content-Type: application/json",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, response::IntoResponse};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: String,
    }

    #[tokio::test]
    async fn valid_json_is_extracted() {
        let request = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name":"ada"}"#))
            .unwrap();

        let ApiJson(payload) = ApiJson::<Payload>::from_request(request, &())
            .await
            .unwrap();
        assert_eq!(payload.name, "ada");
    }

    #[tokio::test]
    async fn wrong_field_type_gets_a_field_tip() {
        let request = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name": 7}"#))
            .unwrap();

        let error = ApiJson::<Payload>::from_request(request, &())
            .await
            .unwrap_err();
        match error {
            AppError::BadRequest { message, tip, .. } => {
                assert!(message.contains("name"), "{message}");
                assert!(tip.unwrap().contains("wrong type"));
            }
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let error = ApiJson::<Payload>::from_request(request, &())
            .await
            .unwrap_err();
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
