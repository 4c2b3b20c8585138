use async_trait::async_trait;
use axum::Router;
use serde::Serialize;

/// Context provided to modules during initialization
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// A single route a module exposes, used for the endpoint index and OpenAPI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub method: &'static str,
    /// Path relative to `/api`, in axum syntax (`/books/{id}`).
    pub path: &'static str,
    pub summary: &'static str,
}

impl Endpoint {
    pub const fn new(method: &'static str, path: &'static str, summary: &'static str) -> Self {
        Self {
            method,
            path,
            summary,
        }
    }

    /// Full path as served, including the `/api` prefix.
    pub fn full_path(&self) -> String {
        format!("/api{}", self.path)
    }
}

/// Core module trait that all playground modules must implement
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name for this module
    fn name(&self) -> &'static str;

    /// Initialize the module with the provided context
    /// Called during application startup before routes are mounted
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Return the Axum router for this module's routes
    /// Routes are merged under `/api`
    fn routes(&self) -> Router {
        Router::new()
    }

    /// Endpoints served by [`Module::routes`]
    fn endpoints(&self) -> Vec<Endpoint> {
        vec![]
    }

    /// Start background tasks for this module
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Stop the module and clean up resources
    /// Called during application shutdown
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_full_path_carries_api_prefix() {
        let endpoint = Endpoint::new("GET", "/books/{id}", "Get a book");
        assert_eq!(endpoint.full_path(), "/api/books/{id}");
    }
}
