use async_trait::async_trait;
use futures::StreamExt;
use log::{debug, info};
use std::sync::Arc;

use super::{Reply, ReplyStrategy};
use crate::config::{ChatConfig, ChatMode};
use crate::error::ChatError;
use crate::llm::chat::ChatClient;
use crate::models::chat::{ChatTurn, Role};

/// Streams replies from the hosted completion API with the persona preamble
/// injected as the first turn.
pub struct UpstreamReplier {
    client: Arc<dyn ChatClient>,
    persona: Arc<str>,
    has_credential: bool,
}

impl UpstreamReplier {
    pub fn new(config: &ChatConfig, client: Arc<dyn ChatClient>) -> Self {
        Self {
            client,
            persona: config.persona.clone(),
            has_credential: config.has_credential(),
        }
    }

    fn build_messages(&self, conversation: &[ChatTurn]) -> Result<Vec<ChatTurn>, ChatError> {
        if conversation.iter().any(|t| t.role == Role::System) {
            return Err(ChatError::InvalidRequest(
                "system turns cannot be supplied by the client".to_string(),
            ));
        }

        let mut messages = Vec::with_capacity(conversation.len() + 1);
        messages.push(ChatTurn::new(Role::System, self.persona.to_string()));
        messages.extend_from_slice(conversation);
        Ok(messages)
    }
}

#[async_trait]
impl ReplyStrategy for UpstreamReplier {
    async fn generate_reply(&self, conversation: &[ChatTurn]) -> Result<Reply, ChatError> {
        if !self.has_credential {
            return Err(ChatError::MissingCredential);
        }

        let messages = self.build_messages(conversation)?;
        info!(
            "Forwarding {} turn(s) to upstream model {}",
            conversation.len(),
            self.client.get_model()
        );
        debug!("Conversation: {:?}", conversation);

        let tokens = self.client.stream_chat(messages).await?;
        let tokens = tokens.filter(|item| {
            let keep = !matches!(item, Ok(text) if text.is_empty());
            async move { keep }
        });
        Ok(Reply::Stream(Box::pin(tokens)))
    }

    fn mode(&self) -> ChatMode {
        ChatMode::Upstream
    }
}
