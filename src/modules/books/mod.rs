pub mod models;
pub mod routes;

use async_trait::async_trait;
use axum::Router;
use playground_kernel::{Endpoint, InitCtx, Module};

use crate::store::SharedStore;

/// Book catalogue: CRUD over the in-memory collection plus search
pub struct BooksModule {
    store: SharedStore,
}

impl BooksModule {
    pub const fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let count = self.store.read().await.books().len();
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books = count,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.store.clone())
    }

    fn endpoints(&self) -> Vec<Endpoint> {
        vec![
            Endpoint::new("GET", "/books", "List books (filter: genre, sort, limit)"),
            Endpoint::new("GET", "/books/{id}", "Get a single book"),
            Endpoint::new("POST", "/books", "Create a book (title and author required)"),
            Endpoint::new("PUT", "/books/{id}", "Replace a book (all fields required)"),
            Endpoint::new("PATCH", "/books/{id}", "Update some fields of a book"),
            Endpoint::new("DELETE", "/books/{id}", "Delete a book"),
            Endpoint::new("GET", "/search", "Search books (q, minYear, maxYear, author)"),
        ]
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(store: SharedStore) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(store))
}
