//! Utility endpoints for exploring HTTP: echo, status codes, delays, random
//! data, a calculator and form handling.

pub mod calculator;
pub mod echo;
pub mod random;
pub mod status;

use std::{collections::BTreeMap, time::Duration};

use async_trait::async_trait;
use axum::{
    extract::{rejection::FormRejection, Query},
    routing::{any, get, post},
    Form, Json, Router,
};
use playground_http::{ApiJson, AppError};
use playground_kernel::{Endpoint, Module};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::utils;
use calculator::CalculateRequest;

/// Delay used by `/api/slow` when none is requested.
pub const DEFAULT_DELAY_MS: u64 = 3000;
/// Longest delay `/api/slow` will honour.
pub const MAX_DELAY_MS: u64 = 10_000;

pub struct ToolsModule;

impl ToolsModule {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for ToolsModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for ToolsModule {
    fn name(&self) -> &'static str {
        "tools"
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/echo", any(echo::echo))
            .route("/echo/{*rest}", any(echo::echo))
            .route("/status/{code}", get(status::simulate_status))
            .route("/slow", get(slow))
            .route("/random", get(random::random_data))
            .route("/calculate", post(calculate))
            .route("/form", post(form))
    }

    fn endpoints(&self) -> Vec<Endpoint> {
        vec![
            Endpoint::new("ANY", "/echo", "Echo the request back"),
            Endpoint::new("ANY", "/echo/{*rest}", "Echo the request back (any sub-path)"),
            Endpoint::new("GET", "/status/{code}", "Respond with the given status code"),
            Endpoint::new("GET", "/slow", "Respond after a delay (delay in ms, max 10000)"),
            Endpoint::new("GET", "/random", "Random number, quote, color, uuid and timestamp"),
            Endpoint::new("POST", "/calculate", "Calculate (operation, a, b)"),
            Endpoint::new("POST", "/form", "Echo url-encoded form fields"),
        ]
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SlowParams {
    pub delay: Option<String>,
}

/// Requested delay in milliseconds, clamped to `0..=MAX_DELAY_MS`.
pub fn delay_ms(raw: Option<&str>) -> u64 {
    utils::parse_number::<i64>(raw)
        .map(|delay| delay.clamp(0, MAX_DELAY_MS as i64) as u64)
        .unwrap_or(DEFAULT_DELAY_MS)
}

async fn slow(Query(params): Query<SlowParams>) -> Json<Value> {
    let delay = delay_ms(params.delay.as_deref());
    tracing::debug!(delay_ms = delay, "delaying response");
    tokio::time::sleep(Duration::from_millis(delay)).await;

    Json(json!({
        "success": true,
        "message": format!("Responded after {delay}ms"),
        "delay": delay,
    }))
}

async fn calculate(ApiJson(request): ApiJson<CalculateRequest>) -> Result<Json<Value>, AppError> {
    let calculation = calculator::calculate(&request)?;
    tracing::debug!(%calculation, "calculated");
    Ok(Json(calculation.to_json()))
}

async fn form(
    fields: Result<Form<BTreeMap<String, String>>, FormRejection>,
) -> Result<Json<Value>, AppError> {
    let Form(fields) = fields.map_err(|rejection| {
        AppError::bad_request(rejection.body_text())
            .with_tip("Send the body with Content-Type: application/x-www-form-urlencoded")
    })?;

    Ok(Json(json!({
        "success": true,
        "message": "Form data received",
        "fieldCount": fields.len(),
        "received": fields,
    })))
}

/// Create a new instance of the tools module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(ToolsModule::new())
}
