use async_trait::async_trait;
use futures::StreamExt;
use log::{debug, warn};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client as HttpClient,
};
use serde::{Deserialize, Serialize};

use super::{create_streaming_response, ChatClient, TokenStream};
use crate::config::ChatConfig;
use crate::error::ChatError;
use crate::models::chat::ChatTurn;
use crate::sse::{data_payload, LineBuffer, DONE_SENTINEL};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAIChatClient {
    http: HttpClient,
    model: String,
    base_url: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct OpenAIChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Deserialize)]
struct OpenAIStreamResponse {
    #[serde(default)]
    choices: Vec<OpenAIStreamChoice>,
    error: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct OpenAIStreamChoice {
    delta: OpenAIDelta,
}

#[derive(Deserialize)]
struct OpenAIDelta {
    content: Option<String>,
}

/// What one line of the upstream event stream means to us.
#[derive(Debug, PartialEq, Eq)]
enum UpstreamLine {
    Fragment(String),
    Done,
    /// The provider reported a failure inside the stream.
    Error(String),
    Skip,
}

fn error_message(error: &serde_json::Value) -> String {
    error
        .get("message")
        .and_then(serde_json::Value::as_str)
        .or_else(|| error.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| error.to_string())
}

fn parse_stream_line(line: &str) -> UpstreamLine {
    let Some(data) = data_payload(line) else {
        return UpstreamLine::Skip;
    };
    if data.trim() == DONE_SENTINEL {
        return UpstreamLine::Done;
    }
    match serde_json::from_str::<OpenAIStreamResponse>(data) {
        Ok(OpenAIStreamResponse { error: Some(error), .. }) => {
            UpstreamLine::Error(error_message(&error))
        }
        Ok(resp) => resp
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.delta.content)
            .filter(|c| !c.is_empty())
            .map(UpstreamLine::Fragment)
            .unwrap_or(UpstreamLine::Skip),
        Err(e) => {
            debug!("Skipping malformed upstream event: {} ({})", data, e);
            UpstreamLine::Skip
        }
    }
}

impl OpenAIChatClient {
    pub fn new(
        api_key: Option<&str>,
        model: String,
        base_url: Option<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<Self, ChatError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|e| ChatError::InvalidRequest(format!("Invalid API key format: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = HttpClient::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            model,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            temperature,
            max_tokens,
        })
    }

    pub fn from_config(config: &ChatConfig) -> Result<Self, ChatError> {
        Self::new(
            config.api_key.as_deref(),
            config.model.clone(),
            config.base_url.clone(),
            config.temperature,
            config.max_tokens,
        )
    }

    fn completions_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with("/chat/completions") {
            base.to_string()
        } else {
            format!("{}/chat/completions", base)
        }
    }
}

#[async_trait]
impl ChatClient for OpenAIChatClient {
    async fn stream_chat(&self, messages: Vec<ChatTurn>) -> Result<TokenStream, ChatError> {
        let req = OpenAIChatRequest {
            model: &self.model,
            messages: &messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            stream: true,
        };

        let resp = self.http.post(self.completions_url()).json(&req).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!("Upstream returned {}: {}", status, body);
            return Err(ChatError::Upstream(format!("upstream status {}", status)));
        }

        Ok(create_streaming_response(move |tx| async move {
            let mut bytes = resp.bytes_stream();
            let mut lines = LineBuffer::new();

            while let Some(chunk) = bytes.next().await {
                let chunk = match chunk {
                    Ok(c) => c,
                    Err(e) => {
                        let _ = tx.send(Err(e.into())).await;
                        return;
                    }
                };
                for line in lines.push(&chunk) {
                    match parse_stream_line(&line) {
                        UpstreamLine::Fragment(text) => {
                            if tx.send(Ok(text)).await.is_err() {
                                // Receiver dropped; the caller stopped reading.
                                return;
                            }
                        }
                        UpstreamLine::Done => return,
                        UpstreamLine::Error(message) => {
                            warn!("Upstream reported an error mid-stream: {}", message);
                            let _ = tx.send(Err(ChatError::Upstream(message))).await;
                            return;
                        }
                        UpstreamLine::Skip => {}
                    }
                }
            }

            match lines.finish().map(|l| parse_stream_line(&l)) {
                Some(UpstreamLine::Fragment(text)) => {
                    let _ = tx.send(Ok(text)).await;
                }
                Some(UpstreamLine::Error(message)) => {
                    warn!("Upstream reported an error mid-stream: {}", message);
                    let _ = tx.send(Err(ChatError::Upstream(message))).await;
                }
                _ => {}
            }
        }))
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }
}
