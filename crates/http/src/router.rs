//! Router builder for the playground HTTP server

use std::{any::Any, time::Duration};

use axum::{
    extract::Request,
    http::HeaderValue,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use uuid::{Timestamp, Uuid};

use playground_kernel::{Endpoint, ModuleRegistry};

use crate::error::AppError;

const HTTP_METHODS: &[&str] = &["get", "post", "put", "patch", "delete"];

#[derive(Default)]
struct Layers {
    tracing: bool,
    cors: bool,
    request_id: bool,
    catch_panic: bool,
    timeout: Option<Duration>,
}

/// Builder for constructing the main HTTP router.
///
/// Module routers are merged under `/api`. Middleware is recorded by the
/// `with_*` methods and applied in [`RouterBuilder::build`], so it wraps
/// every route regardless of call order.
pub struct RouterBuilder {
    router: Router,
    api: Router,
    layers: Layers,
}

impl RouterBuilder {
    /// Create a new router builder
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            api: Router::new(),
            layers: Layers::default(),
        }
    }

    /// Add a route to the router
    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Merge a module's router under `/api`
    pub fn mount_module(mut self, module_name: &str, module_router: Router) -> Self {
        tracing::info!(module = module_name, "mounting module routes under /api");
        self.api = self.api.merge(module_router);
        self
    }

    /// Add tracing middleware
    pub fn with_tracing(mut self) -> Self {
        self.layers.tracing = true;
        self
    }

    /// Add CORS middleware
    pub fn with_cors(mut self) -> Self {
        self.layers.cors = true;
        self
    }

    /// Add request ID middleware
    pub fn with_request_id(mut self) -> Self {
        self.layers.request_id = true;
        self
    }

    /// Turn handler panics into a generic 500 envelope
    pub fn with_panic_handler(mut self) -> Self {
        self.layers.catch_panic = true;
        self
    }

    /// Add timeout middleware
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.layers.timeout = Some(Duration::from_millis(timeout_ms));
        self
    }

    /// Serve an index of every module endpoint at `/`
    pub fn with_index(mut self, registry: &ModuleRegistry) -> Self {
        let endpoints: Vec<Value> = registry
            .endpoints()
            .iter()
            .map(|endpoint| {
                json!({
                    "method": endpoint.method,
                    "path": endpoint.full_path(),
                    "description": endpoint.summary,
                })
            })
            .collect();

        let index = json!({
            "success": true,
            "message": "Welcome to the HTTP playground API",
            "endpoints": endpoints,
            "docs": "/swagger-ui",
        });

        self.router = self
            .router
            .route("/", get(move || async move { Json(index.clone()) }));
        self
    }

    /// Add OpenAPI documentation generated from every module's endpoints
    pub fn with_openapi(mut self, registry: &ModuleRegistry) -> Self {
        let openapi_doc = openapi_document(registry);

        let openapi_obj: utoipa::openapi::OpenApi =
            match serde_json::from_value(openapi_doc.clone()) {
                Ok(doc) => doc,
                Err(err) => {
                    tracing::warn!(error = %err, "generated OpenAPI document rejected; serving a bare one");
                    utoipa::openapi::OpenApiBuilder::new()
                        .info(
                            utoipa::openapi::InfoBuilder::new()
                                .title("HTTP Playground API")
                                .version(env!("CARGO_PKG_VERSION"))
                                .build(),
                        )
                        .build()
                }
            };

        self.router = self.router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi_obj),
        );

        self.router = self.router.route(
            "/docs/openapi.json",
            get(move || async move { Json(openapi_doc.clone()) }),
        );

        self
    }

    /// Build the final router
    pub fn build(self) -> Router {
        let Self {
            router,
            api,
            layers,
        } = self;

        // A known path with an unsupported method is reported like an unknown path.
        let mut router = router
            .nest("/api", api)
            .fallback(endpoint_not_found)
            .method_not_allowed_fallback(endpoint_not_found);

        if layers.catch_panic {
            router = router.layer(CatchPanicLayer::custom(panic_response));
        }
        if let Some(timeout) = layers.timeout {
            router = router.layer(TimeoutLayer::new(timeout));
        }
        if layers.cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(AnyOrigin)
                    .allow_methods(AnyOrigin)
                    .allow_headers(AnyOrigin),
            );
        }
        if layers.tracing {
            router = router.layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().include_headers(true))
                    .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                    .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
            );
        }
        if layers.request_id {
            router = router
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));
        }

        router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Fallback for any unmatched method/path combination
async fn endpoint_not_found(request: Request) -> AppError {
    AppError::not_found("Endpoint not found").with_tip(format!(
        "No route for {} {}; GET / lists every endpoint",
        request.method(),
        request.uri().path()
    ))
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(anyhow::anyhow!("handler panicked: {detail}")).into_response()
}

/// Request ID generator for tracing
#[derive(Clone)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let timestamp = Timestamp::now(uuid::NoContext);
        let request_id = Uuid::new_v7(timestamp)
            .to_string()
            .parse::<HeaderValue>()
            .ok()?;
        Some(RequestId::new(request_id))
    }
}

/// Build an OpenAPI 3.1 document from the registry's endpoints.
fn openapi_document(registry: &ModuleRegistry) -> Value {
    let mut document = json!({
        "openapi": "3.1.0",
        "info": {
            "title": "HTTP Playground API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "In-memory books and users API for exploring HTTP"
        },
        "paths": {},
        "components": {
            "schemas": {
                "Envelope": {
                    "type": "object",
                    "properties": {
                        "success": { "type": "boolean" }
                    },
                    "required": ["success"]
                },
                "ErrorResponse": {
                    "type": "object",
                    "properties": {
                        "success": { "type": "boolean" },
                        "error": { "type": "string" },
                        "code": { "type": "string" },
                        "tip": { "type": "string" },
                        "details": { "type": "array", "items": { "type": "object" } },
                        "trace_id": { "type": "string" },
                        "timestamp": { "type": "string" }
                    },
                    "required": ["success", "error", "code", "trace_id", "timestamp"]
                }
            }
        }
    });

    for module in registry.modules() {
        for endpoint in module.endpoints() {
            let path = openapi_path(&endpoint);
            let methods: Vec<&str> = if endpoint.method == "ANY" {
                HTTP_METHODS.to_vec()
            } else {
                vec![endpoint.method]
            };

            for method in methods {
                document["paths"][&path][method.to_lowercase()] = operation(module.name(), &endpoint);
            }
        }
    }

    document
}

/// OpenAPI path template: `/api` prefix, and `{*rest}` wildcards as `{rest}`.
fn openapi_path(endpoint: &Endpoint) -> String {
    endpoint.full_path().replace("{*", "{")
}

fn path_parameters(endpoint: &Endpoint) -> Vec<Value> {
    endpoint
        .path
        .split('/')
        .filter_map(|segment| segment.strip_prefix('{')?.strip_suffix('}'))
        .map(|name| {
            json!({
                "name": name.trim_start_matches('*'),
                "in": "path",
                "required": true,
                "schema": { "type": "string" }
            })
        })
        .collect()
}

fn operation(tag: &str, endpoint: &Endpoint) -> Value {
    let envelope = |reference: &str| {
        json!({
            "application/json": {
                "schema": { "$ref": format!("#/components/schemas/{reference}") }
            }
        })
    };

    json!({
        "summary": endpoint.summary,
        "tags": [tag],
        "parameters": path_parameters(endpoint),
        "responses": {
            "200": { "description": "Success", "content": envelope("Envelope") },
            "default": { "description": "Error", "content": envelope("ErrorResponse") }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode};
    use playground_kernel::Module;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct PingModule;

    #[async_trait::async_trait]
    impl Module for PingModule {
        fn name(&self) -> &'static str {
            "ping"
        }

        fn routes(&self) -> Router {
            Router::new()
                .route("/ping", get(|| async { "pong" }))
                .route("/echo/{*rest}", axum::routing::any(|| async { "echo" }))
        }

        fn endpoints(&self) -> Vec<Endpoint> {
            vec![
                Endpoint::new("GET", "/ping", "Ping"),
                Endpoint::new("ANY", "/echo/{*rest}", "Echo"),
            ]
        }
    }

    fn registry() -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(PingModule)).unwrap();
        registry
    }

    async fn send(router: Router, uri: &str) -> Response {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_module_routes_are_served_under_api() {
        let registry = registry();
        let module = registry.get_module("ping").unwrap();
        let router = RouterBuilder::new()
            .mount_module(module.name(), module.routes())
            .build();

        let response = send(router.clone(), "/api/ping").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(router, "/ping").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unmatched_route_uses_error_envelope() {
        let router = RouterBuilder::new().build();
        let response = send(router, "/nowhere").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Endpoint not found");
    }

    #[tokio::test]
    async fn test_wrong_method_on_known_path_is_not_found() {
        let registry = registry();
        let module = registry.get_module("ping").unwrap();
        let router = RouterBuilder::new()
            .mount_module(module.name(), module.routes())
            .build();

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Endpoint not found");
    }

    #[tokio::test]
    async fn test_middleware_chain_sets_request_id() {
        let router = RouterBuilder::new()
            .with_tracing()
            .with_cors()
            .with_request_id()
            .with_timeout(5000)
            .route("/health", get(|| async { "ok" }))
            .build();

        let response = send(router, "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    async fn boom() -> &'static str {
        panic!("boom")
    }

    #[tokio::test]
    async fn test_panics_become_internal_errors() {
        let router = RouterBuilder::new()
            .with_panic_handler()
            .route("/boom", get(boom))
            .build();

        let response = send(router, "/boom").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["code"], "internal_error");
    }

    #[tokio::test]
    async fn test_index_and_openapi_list_module_endpoints() {
        let registry = registry();
        let router = RouterBuilder::new()
            .with_index(&registry)
            .with_openapi(&registry)
            .build();

        let index = json_body(send(router.clone(), "/").await).await;
        assert_eq!(index["endpoints"][0]["path"], "/api/ping");
        assert_eq!(index["endpoints"][1]["method"], "ANY");

        let doc = json_body(send(router, "/docs/openapi.json").await).await;
        assert!(doc["paths"]["/api/ping"]["get"].is_object());
        assert!(doc["paths"]["/api/echo/{rest}"]["patch"].is_object());
        assert_eq!(
            doc["paths"]["/api/echo/{rest}"]["get"]["parameters"][0]["name"],
            "rest"
        );
    }
}
