//! Shared harness for driving the API router in-process.
//!
//! Requests go through `tower::ServiceExt::oneshot`; no sockets are
//! bound. Timing tests run under a paused tokio clock and move it
//! forward explicitly with [`step`].

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use siemulate::api::{ApiState, build_router};
use siemulate::engine::{Engine, EngineOptions};
use siemulate::observability::EventEmitter;

/// Fixed per-event delivery delay used by every paced test engine.
pub const STEP: Duration = Duration::from_secs(1);

/// Engine options with a fixed cadence and seed, so a paused clock
/// releases exactly one event per [`step`].
#[must_use]
pub fn paced_options() -> EngineOptions {
    EngineOptions {
        min_delay: STEP,
        max_delay: STEP,
        seed: Some(42),
        ..EngineOptions::default()
    }
}

/// An in-process API with handles to the engine behind it.
pub struct TestApi {
    pub state: Arc<ApiState>,
    pub emitter: Arc<EventEmitter>,
    pub cancel: CancellationToken,
}

impl TestApi {
    /// Build a harness around an engine with the given options.
    #[must_use]
    pub fn new(options: EngineOptions) -> Self {
        let emitter = Arc::new(EventEmitter::noop());
        let cancel = CancellationToken::new();
        let engine = Arc::new(Engine::new(options, Arc::clone(&emitter), cancel.clone()));
        Self {
            state: Arc::new(ApiState::new(engine)),
            emitter,
            cancel,
        }
    }

    fn app(&self) -> Router {
        build_router(Arc::clone(&self.state))
    }

    /// `GET uri`, returning the raw response.
    pub async fn get(&self, uri: &str) -> Response {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request");
        self.app().oneshot(request).await.expect("infallible")
    }

    /// `POST uri` with a JSON body.
    pub async fn post(&self, uri: &str, body: &Value) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(body).expect("serialize")))
            .expect("request");
        self.app().oneshot(request).await.expect("infallible")
    }

    /// `DELETE uri`.
    pub async fn delete(&self, uri: &str) -> Response {
        let request = Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .expect("request");
        self.app().oneshot(request).await.expect("infallible")
    }

    /// Start a session on `scenario` and return its id.
    pub async fn start_session(&self, scenario: &str) -> String {
        let response = self
            .post(
                &format!("/scenarios/complex/{scenario}/start"),
                &Value::Null,
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        body["session_id"].as_str().expect("session_id").to_owned()
    }

    /// Fetch the delivered feed for `session_id`.
    pub async fn events(&self, session_id: &str) -> Vec<Value> {
        let response = self
            .get(&format!("/scenarios/complex/{session_id}/events"))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        body["events"].as_array().expect("events array").clone()
    }
}

/// Parse a response body as JSON.
pub async fn read_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("JSON body")
}

/// Advance the paused clock by one delivery step and let the spawned
/// delivery tasks run.
///
/// Yields before advancing so that freshly spawned delivery tasks get
/// polled and register their sleep timers against the pre-advance clock.
pub async fn step() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    tokio::time::advance(STEP).await;
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}
