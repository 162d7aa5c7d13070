// Common test utilities and helpers

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::ServiceExt;

use crate::services::llm::{CompletionClient, LLMError, PromptPair};
use crate::{AppState, SatireService, build_router};

/// What the stub upstream does when called
#[derive(Debug, Clone)]
pub enum StubReply {
    Content(String),
    Status(u16, String),
    Panic,
}

/// Scripted `CompletionClient`
pub struct StubClient {
    reply: StubReply,
    calls: AtomicUsize,
}

impl StubClient {
    pub fn new(reply: StubReply) -> Arc<Self> {
        Arc::new(Self { reply, calls: AtomicUsize::new(0) })
    }

    pub fn content(content: &str) -> Arc<Self> {
        Self::new(StubReply::Content(content.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for StubClient {
    async fn complete(&self, _prompt: &PromptPair) -> Result<String, LLMError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            StubReply::Content(content) => Ok(content.clone()),
            StubReply::Status(status, body) => {
                Err(LLMError::Upstream { status: *status, body: body.clone() })
            },
            StubReply::Panic => panic!("stub client exploded"),
        }
    }
}

/// Service with a seeded template picker
pub fn create_test_service(client: Option<Arc<StubClient>>) -> SatireService {
    let client = client.map(|c| c as Arc<dyn CompletionClient>);
    SatireService::new(client, Box::new(StdRng::seed_from_u64(2024)))
}

pub fn create_test_router(client: Option<Arc<StubClient>>) -> Router {
    let state = Arc::new(AppState { satire_service: create_test_service(client) });
    build_router(state)
}

/// Send one request and decode the JSON reply
pub async fn send(router: Router, method: Method, body: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method(method)
                .uri("/api/generate")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn post_json(router: Router, body: Value) -> (StatusCode, Value) {
    send(router, Method::POST, &body.to_string()).await
}
