#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::body::to_bytes;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use futures::{stream, StreamExt};
use portfolio_chat::config::ChatConfig;
use portfolio_chat::error::ChatError;
use portfolio_chat::llm::chat::{ChatClient, TokenStream};
use portfolio_chat::models::api::{CannedReply, ChatRequest};
use portfolio_chat::models::chat::ChatTurn;
use portfolio_chat::reply::UpstreamReplier;
use portfolio_chat::server::api::router;
use portfolio_chat::widget::transport::{is_json_reply, ChatResponse, ChatTransport};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const TEST_PERSONA: &str = "You are the test persona.";

/// How the stubbed completion API behaves.
#[derive(Clone)]
pub enum Script {
    Fragments(Vec<&'static str>),
    FailBeforeOpen,
    FailMidStream(Vec<&'static str>),
}

pub struct StubClient {
    script: Script,
    calls: AtomicUsize,
    seen: Mutex<Vec<ChatTurn>>,
}

impl StubClient {
    pub fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<ChatTurn> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for StubClient {
    async fn stream_chat(&self, messages: Vec<ChatTurn>) -> Result<TokenStream, ChatError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.seen.lock().unwrap() = messages;

        let (fragments, fail) = match &self.script {
            Script::FailBeforeOpen => {
                return Err(ChatError::Upstream("connection refused".into()));
            }
            Script::Fragments(f) => (f.clone(), false),
            Script::FailMidStream(f) => (f.clone(), true),
        };

        let mut items: Vec<Result<String, ChatError>> =
            fragments.into_iter().map(|f| Ok(f.to_string())).collect();
        if fail {
            items.push(Err(ChatError::Upstream("stream reset".into())));
        }
        Ok(Box::pin(stream::iter(items)))
    }

    fn get_model(&self) -> String {
        "stub-model".into()
    }
}

pub fn config(api_key: Option<&str>) -> ChatConfig {
    ChatConfig {
        api_key: api_key.map(str::to_string),
        persona: Arc::from(TEST_PERSONA),
        ..ChatConfig::default()
    }
}

pub fn upstream_app(api_key: Option<&str>, client: Arc<StubClient>) -> Router {
    router(Arc::new(UpstreamReplier::new(&config(api_key), client)))
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Serves widget requests straight from an in-process router.
pub struct RouterTransport(pub Router);

#[async_trait]
impl ChatTransport for RouterTransport {
    async fn open(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
        let body = serde_json::to_string(request).unwrap();
        let resp = self.0.clone().oneshot(post_json("/api/chat", &body)).await.unwrap();
        if resp.status() != StatusCode::OK {
            return Err(ChatError::Upstream(format!("status {}", resp.status())));
        }
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());
        if is_json_reply(content_type) {
            let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
            let reply: CannedReply = serde_json::from_slice(&bytes).unwrap();
            return Ok(ChatResponse::Reply(reply.response));
        }
        Ok(ChatResponse::Stream(Box::pin(
            resp.into_body()
                .into_data_stream()
                .map(|chunk| chunk.map_err(|e| ChatError::Upstream(e.to_string()))),
        )))
    }
}
