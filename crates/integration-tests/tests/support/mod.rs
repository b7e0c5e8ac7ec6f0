#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use api_server::http::{AppState, build_router};
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use serde_json::{Value, json};
use shared::llm::{
    AnalysisCapability, GenerationRequest, GenerationResponse, GenerativeGateway,
    GenerativeGatewayError, GenerativeGatewayFuture, TokenUsage,
};
use shared::session::SessionStore;
use tower::ServiceExt;

pub const TEST_MAX_UPLOAD_BYTES: usize = 64 * 1024;
pub const SCRIPTED_MODEL: &str = "scripted-model";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub capability: AnalysisCapability,
    pub prompt: String,
    pub image_mime_type: Option<String>,
    pub image_bytes: Option<Vec<u8>>,
}

/// Gateway double that replays queued outcomes and records every request.
#[derive(Default)]
pub struct ScriptedGateway {
    replies: Mutex<VecDeque<Result<String, GenerativeGatewayError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedGateway {
    pub fn with_replies(replies: Vec<Result<String, GenerativeGatewayError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::from(replies)),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .expect("recorded requests lock should not be poisoned")
            .clone()
    }
}

impl GenerativeGateway for ScriptedGateway {
    fn generate<'a>(&'a self, request: GenerationRequest) -> GenerativeGatewayFuture<'a> {
        self.requests
            .lock()
            .expect("recorded requests lock should not be poisoned")
            .push(RecordedRequest {
                capability: request.capability,
                prompt: request.prompt.clone(),
                image_mime_type: request.image.as_ref().map(|image| image.mime_type.clone()),
                image_bytes: request.image.as_ref().map(|image| image.data.clone()),
            });

        let reply = self
            .replies
            .lock()
            .expect("scripted replies lock should not be poisoned")
            .pop_front()
            .unwrap_or_else(|| Ok("scripted analysis".to_string()));

        Box::pin(async move {
            reply.map(|text| GenerationResponse {
                model: SCRIPTED_MODEL.to_string(),
                text,
                usage: Some(TokenUsage {
                    prompt_tokens: 10,
                    completion_tokens: 5,
                    total_tokens: 15,
                }),
            })
        })
    }
}

pub fn build_test_router(gateway: Arc<ScriptedGateway>) -> axum::Router {
    build_test_router_with_ttl(gateway, Duration::from_secs(3600))
}

pub fn build_test_router_with_ttl(gateway: Arc<ScriptedGateway>, ttl: Duration) -> axum::Router {
    build_router(AppState {
        sessions: SessionStore::new(ttl),
        llm_gateway: gateway,
        max_upload_bytes: TEST_MAX_UPLOAD_BYTES,
    })
}

pub fn build_test_router_with_upload_limit(
    gateway: Arc<ScriptedGateway>,
    max_upload_bytes: usize,
) -> axum::Router {
    build_router(AppState {
        sessions: SessionStore::new(Duration::from_secs(3600)),
        llm_gateway: gateway,
        max_upload_bytes,
    })
}

pub struct JsonResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send_json(app: &axum::Router, request: Request<Body>) -> JsonResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request should succeed");
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should read");
    let body = serde_json::from_slice::<Value>(&body).unwrap_or_else(|_| json!({}));

    JsonResponse {
        status,
        headers,
        body,
    }
}

pub fn request(method: Method, path: &str, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::ACCEPT, "application/json");

    let request_body = body
        .map(|value| {
            serde_json::to_vec(&value).expect("json body should serialize for integration request")
        })
        .unwrap_or_default();
    if !request_body.is_empty() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }

    builder
        .body(Body::from(request_body))
        .expect("integration request should build")
}

pub async fn create_session(app: &axum::Router) -> String {
    let response = send_json(app, request(Method::POST, "/v1/sessions", None)).await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body["session_id"]
        .as_str()
        .expect("session id should be a string")
        .to_string()
}

pub fn error_code(body: &Value) -> Option<&str> {
    body.get("error")?.get("code")?.as_str()
}
