//! Request reflection for debugging clients.

use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::{OriginalUri, Query},
    http::{HeaderMap, Method},
    Json,
};
use serde_json::{json, Map, Value};

/// Headers copied into the echo response; everything else is dropped.
pub const ECHOED_HEADERS: &[&str] = &[
    "content-type",
    "user-agent",
    "accept",
    "authorization",
    "x-api-key",
    "x-request-id",
    "x-custom-header",
];

/// Reflect method, path, selected headers, query and body back to the caller.
pub async fn echo(
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Query(query): Query<BTreeMap<String, String>>,
    body: Bytes,
) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Echo: here is what you sent",
        "request": {
            "method": method.as_str(),
            "path": uri.path(),
            "headers": selected_headers(&headers),
            "query": query,
            "body": body_value(&body),
        }
    }))
}

fn selected_headers(headers: &HeaderMap) -> Map<String, Value> {
    ECHOED_HEADERS
        .iter()
        .filter_map(|name| {
            let value = headers.get(*name)?.to_str().ok()?;
            Some((name.to_string(), Value::String(value.to_string())))
        })
        .collect()
}

/// JSON bodies are echoed as JSON, anything else as text, and an empty body
/// as `null`.
fn body_value(body: &[u8]) -> Value {
    if body.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn body_is_json_when_possible() {
        assert_eq!(body_value(b""), Value::Null);
        assert_eq!(body_value(br#"{"a":1}"#), json!({"a": 1}));
        assert_eq!(body_value(b"name=ada"), json!("name=ada"));
    }

    #[test]
    fn only_listed_headers_are_echoed() {
        let mut headers = HeaderMap::new();
        headers.insert("x-custom-header", HeaderValue::from_static("hello"));
        headers.insert("cookie", HeaderValue::from_static("session=1"));

        let echoed = selected_headers(&headers);
        assert_eq!(echoed.len(), 1);
        assert_eq!(echoed["x-custom-header"], "hello");
    }
}
