use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::api::ErrorBody;

#[derive(Debug, Error)]
pub enum ChatError {
    /// The upstream credential is not configured. Raised before any upstream call.
    #[error("OpenAI API key not configured")]
    MissingCredential,

    #[error("upstream request failed: {0}")]
    Upstream(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ChatError {
    pub fn status(&self) -> StatusCode {
        match self {
            ChatError::MissingCredential => StatusCode::INTERNAL_SERVER_ERROR,
            ChatError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ChatError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Text exposed to callers. Upstream details stay in the server log.
    pub fn public_message(&self) -> String {
        match self {
            ChatError::Upstream(_) => "Failed to process message".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::Upstream(err.to_string())
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.public_message(),
        };
        (self.status(), Json(body)).into_response()
    }
}
