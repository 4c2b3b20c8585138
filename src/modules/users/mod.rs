pub mod models;

use async_trait::async_trait;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use playground_authz::{ApiKeyGuard, BearerGuard};
use playground_http::{ApiJson, AppError};
use playground_kernel::{settings::AuthSettings, Endpoint, InitCtx, Module};
use serde_json::{json, Value};

use crate::store::{ListQuery, SharedStore};
use models::UserFields;

/// Users behind two credential checks: a bearer token for reading and an
/// API key for creating.
pub struct UsersModule {
    state: UsersState,
}

#[derive(Clone)]
struct UsersState {
    store: SharedStore,
    readers: BearerGuard,
    writers: ApiKeyGuard,
}

impl UsersModule {
    pub fn new(store: SharedStore, auth: &AuthSettings) -> Self {
        Self {
            state: UsersState {
                store,
                readers: BearerGuard::new(auth.bearer_token.clone()),
                writers: ApiKeyGuard::new(auth.api_key.clone()),
            },
        }
    }
}

#[async_trait]
impl Module for UsersModule {
    fn name(&self) -> &'static str {
        "users"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "users module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/users", get(list_users).post(create_user))
            .with_state(self.state.clone())
    }

    fn endpoints(&self) -> Vec<Endpoint> {
        vec![
            Endpoint::new("GET", "/users", "List users (requires Authorization: Bearer token)"),
            Endpoint::new("POST", "/users", "Create a user (requires X-API-Key header)"),
        ]
    }
}

async fn list_users(
    State(state): State<UsersState>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    state.readers.check(&headers).map_err(|err| {
        AppError::from(err).with_tip("Send the header Authorization: Bearer <token>")
    })?;

    let users = state.store.read().await.list_users(&ListQuery::default());
    Ok(Json(json!({
        "success": true,
        "count": users.len(),
        "data": users,
    })))
}

async fn create_user(
    State(state): State<UsersState>,
    headers: HeaderMap,
    body: Result<ApiJson<UserFields>, AppError>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    // Any API key failure is a 401, including a wrong key.
    state.writers.check(&headers).map_err(|err| {
        AppError::unauthorized(format!("Invalid or missing API key ({err})"))
            .with_tip("Send the header X-API-Key: <key>")
    })?;
    let ApiJson(fields) = body?;

    let user = state.store.write().await.create_user(fields)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "User created successfully",
            "data": user,
        })),
    ))
}

/// Create a new instance of the users module
pub fn create_module(store: SharedStore, auth: &AuthSettings) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(UsersModule::new(store, auth))
}
