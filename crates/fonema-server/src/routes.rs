//! HTTP routes: `/api/analyze` and `/health`.

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Json;
use axum::routing::{get, post};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use fonema_llm::fallback::generate_analysis;
use fonema_llm::provider::Provider;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::health::{self, HealthResponse};

/// Shared state accessible from route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upstream provider (Gemini in production, a stub in tests).
    pub provider: Arc<dyn Provider>,
    /// Candidate models in priority order.
    pub models: Arc<[String]>,
    /// When the server started.
    pub started_at: Instant,
    /// Include upstream details on 500 responses.
    pub expose_upstream_errors: bool,
}

impl AppState {
    /// Assemble state from a provider, a candidate list, and config.
    pub fn new(provider: Arc<dyn Provider>, models: Vec<String>, config: &ServerConfig) -> Self {
        Self {
            provider,
            models: models.into(),
            started_at: Instant::now(),
            expose_upstream_errors: config.expose_upstream_errors,
        }
    }
}

/// Request body for `/api/analyze`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Word or phrase to analyze.
    #[serde(default)]
    pub text: Option<String>,
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze).fallback(method_not_allowed))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// POST /api/analyze
///
/// The success body is the parsed model output passed through verbatim —
/// whatever keys the model produced, without re-validating the nominal
/// `ipa`/`spanish_sound`/`tip` shape.
async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let text = payload
        .ok()
        .and_then(|Json(request)| request.text)
        .filter(|text| !text.trim().is_empty())
        .ok_or(ApiError::MissingText)?;

    info!(text = %text, "analyzing");

    let value = generate_analysis(state.provider.as_ref(), state.models.as_ref(), &text)
        .await
        .map_err(|err| ApiError::from_provider(err, state.expose_upstream_errors))?;

    Ok(Json(value))
}

/// Any non-POST method on `/api/analyze`.
async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(health::health_check(state.started_at, state.models.len()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use fonema_llm::provider::{ProviderError, ProviderResult};
    use serde_json::json;
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Scripted per-candidate outcome.
    enum Script {
        Text(&'static str),
        ApiError(u16),
    }

    /// Provider stub that replays a script and counts calls.
    struct StubProvider {
        script: Vec<Script>,
        calls: Mutex<usize>,
    }

    impl StubProvider {
        fn new(script: Vec<Script>) -> Self {
            Self {
                script,
                calls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl Provider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn generate(&self, model: &str, _prompt: &str) -> ProviderResult<String> {
            let mut calls = self.calls.lock().unwrap();
            let index = *calls;
            *calls += 1;
            match self.script.get(index) {
                Some(Script::Text(text)) => Ok((*text).to_string()),
                Some(Script::ApiError(status)) => Err(ProviderError::Api {
                    status: *status,
                    message: format!("upstream failure {status}"),
                    code: None,
                }),
                None => panic!("unscripted call for model {model}"),
            }
        }
    }

    fn app_with(script: Vec<Script>, candidates: usize, expose: bool) -> (Router, Arc<StubProvider>) {
        let stub = Arc::new(StubProvider::new(script));
        let models = (0..candidates).map(|i| format!("model-{i}")).collect();
        let config = ServerConfig {
            expose_upstream_errors: expose,
            ..ServerConfig::default()
        };
        let state = AppState::new(stub.clone(), models, &config);
        (router(state), stub)
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 100_000).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // ── Method handling ───────────────────────────────────────────────

    #[tokio::test]
    async fn get_is_method_not_allowed() {
        let (app, _) = app_with(vec![], 1, true);
        let request = Request::builder()
            .method("GET")
            .uri("/api/analyze")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Method not allowed");
    }

    #[tokio::test]
    async fn delete_is_method_not_allowed() {
        let (app, _) = app_with(vec![], 1, true);
        let request = Request::builder()
            .method("DELETE")
            .uri("/api/analyze")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    // ── Request validation ────────────────────────────────────────────

    #[tokio::test]
    async fn missing_body_is_bad_request() {
        let (app, _) = app_with(vec![], 1, true);
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Text is required");
    }

    #[tokio::test]
    async fn missing_text_field_is_bad_request() {
        let (app, _) = app_with(vec![], 1, true);
        let response = app.oneshot(post_json("{}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_text_is_bad_request() {
        let (app, _) = app_with(vec![], 1, true);
        let response = app.oneshot(post_json(r#"{"text": ""}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn whitespace_text_is_bad_request() {
        let (app, _) = app_with(vec![], 1, true);
        let response = app.oneshot(post_json(r#"{"text": "   "}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    // ── Success path ──────────────────────────────────────────────────

    #[tokio::test]
    async fn success_returns_parsed_object_verbatim() {
        let (app, stub) = app_with(
            vec![Script::Text(
                "{\"ipa\":\"/tʃiz/\",\"spanish_sound\":\"chiis\",\"tip\":\"say it short\"}",
            )],
            4,
            true,
        );

        let response = app.oneshot(post_json(r#"{"text": "cheese"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(
            body,
            json!({"ipa": "/tʃiz/", "spanish_sound": "chiis", "tip": "say it short"})
        );
        assert_eq!(*stub.calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn fallback_to_second_candidate() {
        let (app, stub) = app_with(
            vec![
                Script::ApiError(503),
                Script::Text("```json\n{\"ipa\":\"x\"}\n```"),
            ],
            4,
            true,
        );

        let response = app.oneshot(post_json(r#"{"text": "x"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body, json!({"ipa": "x"}));
        // candidates 3 and 4 were never invoked
        assert_eq!(*stub.calls.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn extra_keys_pass_through_unvalidated() {
        let (app, _) = app_with(
            vec![Script::Text("{\"ipa\":\"x\",\"unexpected\":42}")],
            1,
            true,
        );

        let response = app.oneshot(post_json(r#"{"text": "x"}"#)).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["unexpected"], 42);
    }

    // ── Exhaustion ────────────────────────────────────────────────────

    #[tokio::test]
    async fn exhaustion_is_server_error_with_details() {
        let (app, stub) = app_with(
            vec![Script::ApiError(500), Script::ApiError(404)],
            2,
            true,
        );

        let response = app.oneshot(post_json(r#"{"text": "x"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "All models failed");
        assert!(body["details"].as_str().unwrap().contains("404"));
        assert_eq!(*stub.calls.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn exhaustion_hides_details_when_configured() {
        let (app, _) = app_with(vec![Script::ApiError(500)], 1, false);

        let response = app.oneshot(post_json(r#"{"text": "x"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "All models failed");
        assert!(body.get("details").is_none());
    }

    // ── Other routes ──────────────────────────────────────────────────

    #[tokio::test]
    async fn health_reports_model_count() {
        let (app, _) = app_with(vec![], 4, true);
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["models"], 4);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let (app, _) = app_with(vec![], 1, true);
        let request = Request::builder()
            .uri("/nonexistent")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
