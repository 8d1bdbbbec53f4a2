use async_trait::async_trait;

use super::{Reply, ReplyStrategy};
use crate::config::ChatMode;
use crate::error::ChatError;
use crate::models::chat::{ChatTurn, Role};
use crate::responder::CannedResponder;

/// Answers the latest user turn from the canned table. No upstream dependency.
#[derive(Debug, Default)]
pub struct CannedReplier {
    responder: CannedResponder,
}

impl CannedReplier {
    pub fn new() -> Self {
        Self {
            responder: CannedResponder::new(),
        }
    }
}

#[async_trait]
impl ReplyStrategy for CannedReplier {
    async fn generate_reply(&self, conversation: &[ChatTurn]) -> Result<Reply, ChatError> {
        let question = conversation
            .iter()
            .rev()
            .find(|t| t.role == Role::User)
            .map(|t| t.content.as_str())
            .unwrap_or("");
        Ok(Reply::Single(self.responder.respond(question)))
    }

    fn mode(&self) -> ChatMode {
        ChatMode::Canned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responder::{table, Category};

    #[tokio::test]
    async fn answers_latest_user_turn() {
        let replier = CannedReplier::new();
        let turns = vec![
            ChatTurn::new(Role::User, "hello"),
            ChatTurn::new(Role::Assistant, "hi!"),
            ChatTurn::new(Role::User, "how can I email you?"),
        ];
        match replier.generate_reply(&turns).await.unwrap() {
            Reply::Single(text) => assert_eq!(text, table::replies(Category::Contact)[0]),
            Reply::Stream(_) => panic!("canned replies are never streamed"),
        }
    }

    #[tokio::test]
    async fn empty_conversation_still_gets_a_reply() {
        let replier = CannedReplier::new();
        match replier.generate_reply(&[]).await.unwrap() {
            Reply::Single(text) => assert!(!text.is_empty()),
            Reply::Stream(_) => panic!("canned replies are never streamed"),
        }
    }
}
