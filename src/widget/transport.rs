use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use log::warn;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client as HttpClient;
use std::pin::Pin;

use crate::error::ChatError;
use crate::models::api::{CannedReply, ChatRequest};

/// Raw response body of the chat endpoint.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, ChatError>> + Send>>;

/// A successful answer from the chat endpoint.
pub enum ChatResponse {
    /// `text/event-stream` body, decoded incrementally.
    Stream(ByteStream),
    /// Whole reply in one JSON document, as served in canned mode.
    Reply(String),
}

/// Whether a response `Content-Type` carries a single JSON reply.
pub fn is_json_reply(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Posts the conversation and returns the reply once a success status
    /// has arrived. Non-success statuses are errors.
    async fn open(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError>;
}

pub struct HttpTransport {
    http: HttpClient,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn open(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
        let resp = self.http.post(&self.endpoint).json(request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!("Chat endpoint returned {}: {}", status, body);
            return Err(ChatError::Upstream(format!("chat endpoint returned {}", status)));
        }

        let content_type = resp.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
        if is_json_reply(content_type) {
            let reply: CannedReply = resp.json().await?;
            return Ok(ChatResponse::Reply(reply.response));
        }

        Ok(ChatResponse::Stream(Box::pin(
            resp.bytes_stream().map(|chunk| chunk.map_err(ChatError::from)),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_content_types_are_single_replies() {
        assert!(is_json_reply(Some("application/json")));
        assert!(is_json_reply(Some("application/json; charset=utf-8")));
        assert!(!is_json_reply(Some("text/event-stream")));
        assert!(!is_json_reply(None));
    }
}
