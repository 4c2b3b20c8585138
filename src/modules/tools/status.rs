//! Status-code simulator.

use axum::{extract::Path, http::StatusCode, response::IntoResponse, Json};
use playground_http::AppError;
use serde::Serialize;
use serde_json::json;

/// Codes that can be sent back as a final response. Informational 1xx codes
/// are not valid final statuses on the wire, so they are rejected.
pub const STATUS_RANGE: std::ops::RangeInclusive<u16> = 200..=999;

/// Canned explanation of an HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusInfo {
    pub meaning: &'static str,
    pub description: &'static str,
}

const UNKNOWN: StatusInfo = StatusInfo {
    meaning: "Unknown Status Code",
    description: "This code is not in the playground's table of common status codes",
};

/// Look up a status code in the table of well-known codes.
pub fn describe(code: u16) -> StatusInfo {
    let (meaning, description) = match code {
        200 => ("OK", "The request succeeded"),
        201 => ("Created", "The request succeeded and a new resource was created"),
        204 => ("No Content", "The request succeeded and there is no body to return"),
        301 => ("Moved Permanently", "The resource now lives at a different URL"),
        304 => ("Not Modified", "The cached copy is still valid"),
        400 => ("Bad Request", "The server could not understand the request"),
        401 => ("Unauthorized", "Authentication is required"),
        403 => ("Forbidden", "Authenticated, but not allowed to access this resource"),
        404 => ("Not Found", "The requested resource does not exist"),
        405 => ("Method Not Allowed", "The HTTP method is not supported for this resource"),
        409 => ("Conflict", "The request conflicts with the current state of the resource"),
        429 => ("Too Many Requests", "Rate limit exceeded; slow down"),
        500 => ("Internal Server Error", "The server hit an unexpected condition"),
        502 => ("Bad Gateway", "An upstream server returned an invalid response"),
        503 => ("Service Unavailable", "The server is temporarily unable to handle the request"),
        _ => return UNKNOWN,
    };
    StatusInfo {
        meaning,
        description,
    }
}

/// `GET /api/status/{code}`: answer with the requested code itself.
pub async fn simulate_status(Path(raw): Path<String>) -> Result<impl IntoResponse, AppError> {
    let status = raw
        .trim()
        .parse::<u16>()
        .ok()
        .filter(|code| STATUS_RANGE.contains(code))
        .and_then(|code| StatusCode::from_u16(code).ok())
        .ok_or_else(|| {
            AppError::validation(
                vec![json!({ "field": "code", "value": raw })],
                format!("'{raw}' is not a usable HTTP status code"),
            )
            .with_tip("Use a number between 200 and 999, e.g. /api/status/404")
        })?;

    let code = status.as_u16();
    let info = describe(code);
    tracing::debug!(code, meaning = info.meaning, "simulating status");

    Ok((
        status,
        Json(json!({
            "success": code < 400,
            "status": code,
            "meaning": info.meaning,
            "description": info.description,
        })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_have_meanings() {
        assert_eq!(describe(404).meaning, "Not Found");
        assert_eq!(describe(429).meaning, "Too Many Requests");
        for code in [200, 201, 204, 301, 304, 400, 401, 403, 404, 405, 409, 429, 500, 502, 503] {
            assert_ne!(describe(code), UNKNOWN, "code {code}");
        }
    }

    #[tokio::test]
    async fn informational_and_out_of_range_codes_are_rejected() {
        for raw in ["100", "102", "199", "1000", "42", "teapot"] {
            let error = simulate_status(Path(raw.to_string())).await.err();
            let error = error.unwrap_or_else(|| panic!("{raw} should be rejected"));
            assert_eq!(error.status(), StatusCode::BAD_REQUEST, "code {raw}");
        }
    }

    #[tokio::test]
    async fn accepted_codes_become_the_response_status() {
        for code in [200u16, 204, 418, 999] {
            let response = simulate_status(Path(code.to_string()))
                .await
                .unwrap()
                .into_response();
            assert_eq!(response.status().as_u16(), code);
        }
    }

    #[test]
    fn unlisted_codes_are_unknown() {
        assert_eq!(describe(999), UNKNOWN);
        assert_eq!(describe(418).meaning, "Unknown Status Code");
    }
}
