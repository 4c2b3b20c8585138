//! HTTP playground application library
//!
//! In-memory books and users served over a JSON API, plus utility endpoints
//! for exploring HTTP methods, headers, status codes and authentication.

pub mod modules;
pub mod store;
pub mod utils;

use anyhow::Context;
use axum::Router;
use playground_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use store::{SharedStore, Store};

/// A fully wired application: registry of modules sharing one store.
pub struct App {
    pub registry: ModuleRegistry,
    pub store: SharedStore,
}

impl App {
    /// Build the registry around a freshly seeded store.
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        Self::with_store(settings, Store::seeded().into_shared())
    }

    pub fn with_store(settings: &Settings, store: SharedStore) -> anyhow::Result<Self> {
        let mut registry = ModuleRegistry::new();
        modules::register_all(&mut registry, &store, settings)
            .context("failed to register modules")?;
        Ok(Self { registry, store })
    }

    /// The complete HTTP router, middleware included.
    pub fn router(&self, settings: &Settings) -> Router {
        playground_http::build_router(&self.registry, settings)
    }
}

/// Initialize modules, serve until shutdown, then stop modules.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let app = App::new(&settings)?;
    let ctx = InitCtx {
        settings: &settings,
    };

    app.registry.init_modules(&ctx).await?;
    app.registry.start_modules(&ctx).await?;

    let served = playground_http::start_server(&app.registry, &settings).await;

    app.registry.stop_modules().await?;
    served
}
