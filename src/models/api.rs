use serde::{Deserialize, Serialize};

use super::chat::{ChatTurn, Role};

/// Streaming-mode request body: the running conversation, oldest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatTurn>,
}

/// Canned-mode request body.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CannedRequest {
    pub message: String,
}

/// Either body shape accepted by `POST /api/chat`.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum ChatPayload {
    Conversation(ChatRequest),
    Single(CannedRequest),
}

impl ChatPayload {
    pub fn into_turns(self) -> Vec<ChatTurn> {
        match self {
            ChatPayload::Conversation(req) => req.messages,
            ChatPayload::Single(req) => vec![ChatTurn::new(Role::User, req.message)],
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CannedReply {
    pub response: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Payload of one `data:` event in the reply stream.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StreamFragment {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub mode: String,
}
