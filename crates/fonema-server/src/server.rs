//! `AnalyzerServer` — axum HTTP server with graceful shutdown.

use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::routes::{self, AppState};
use crate::shutdown::ShutdownCoordinator;

/// The analyzer HTTP server.
pub struct AnalyzerServer {
    config: ServerConfig,
    state: AppState,
    shutdown: Arc<ShutdownCoordinator>,
}

impl AnalyzerServer {
    /// Create a new server.
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state,
            shutdown: Arc::new(ShutdownCoordinator::new()),
        }
    }

    /// Build the axum router with middleware layers.
    ///
    /// CORS is permissive — browser frontends call the endpoint
    /// directly. The catch-panic layer keeps a panicking handler from
    /// surfacing as a raw transport fault.
    pub fn router(&self) -> Router {
        routes::router(self.state.clone())
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(CatchPanicLayer::custom(handle_panic))
    }

    /// Get the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get the shutdown coordinator.
    pub fn shutdown(&self) -> &Arc<ShutdownCoordinator> {
        &self.shutdown
    }

    /// Bind and serve; returns the bound address and the serve task.
    ///
    /// The task runs until the shutdown coordinator fires, then drains
    /// in-flight connections.
    pub async fn listen(&self) -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;
        let local_addr = listener.local_addr()?;

        let app = self.router();
        let token = self.shutdown.token();
        let handle = tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move { token.cancelled().await })
                .await;
            if let Err(err) = result {
                error!(error = %err, "server error");
            }
        });

        info!(addr = %local_addr, "listening");
        Ok((local_addr, handle))
    }
}

/// Convert a handler panic into the generic JSON 500 body.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = %detail, "handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, header};
    use axum::routing::get;
    use fonema_llm::provider::{Provider, ProviderResult};
    use tower::ServiceExt;

    struct NoopProvider;

    #[async_trait]
    impl Provider for NoopProvider {
        fn name(&self) -> &str {
            "noop"
        }

        async fn generate(&self, _model: &str, _prompt: &str) -> ProviderResult<String> {
            Ok("{\"ipa\":\"x\"}".to_string())
        }
    }

    fn make_server() -> AnalyzerServer {
        let config = ServerConfig::default();
        let state = AppState::new(
            Arc::new(NoopProvider),
            vec!["model-a".to_string()],
            &config,
        );
        AnalyzerServer::new(config, state)
    }

    #[test]
    fn server_with_default_config() {
        let server = make_server();
        assert_eq!(server.config().host, "127.0.0.1");
        assert_eq!(server.config().port, 0);
    }

    #[test]
    fn shutdown_coordinator_accessible() {
        let server = make_server();
        assert!(!server.shutdown().is_shutting_down());
        server.shutdown().shutdown();
        assert!(server.shutdown().is_shutting_down());
    }

    #[tokio::test]
    async fn layered_router_serves_analyze() {
        let server = make_server();
        let app = server.router();

        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text": "x"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn listen_binds_ephemeral_port_and_shuts_down() {
        let server = make_server();
        let (addr, handle) = server.listen().await.unwrap();
        assert_ne!(addr.port(), 0);

        server.shutdown().shutdown();
        tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .expect("shutdown timed out")
            .expect("join error");
    }

    #[tokio::test]
    async fn panic_becomes_generic_json_500() {
        async fn boom() -> StatusCode {
            panic!("boom")
        }
        let app: Router = Router::new()
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(handle_panic));

        let request = Request::builder().uri("/boom").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), 10_000).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["error"], "Internal server error");
    }
}
