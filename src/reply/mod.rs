//! One capability behind `/api/chat`: turn a conversation into a reply. The
//! concrete strategy is picked once from [`ChatConfig::mode`].

pub mod canned;
pub mod upstream;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{ChatConfig, ChatMode};
use crate::error::ChatError;
use crate::llm::chat::{new_client, TokenStream};
use crate::models::chat::ChatTurn;

pub use canned::CannedReplier;
pub use upstream::UpstreamReplier;

pub enum Reply {
    /// Incremental fragments, relayed as an event stream.
    Stream(TokenStream),
    /// A complete reply, returned as a JSON body.
    Single(String),
}

#[async_trait]
pub trait ReplyStrategy: Send + Sync {
    async fn generate_reply(&self, conversation: &[ChatTurn]) -> Result<Reply, ChatError>;

    fn mode(&self) -> ChatMode;
}

pub fn new_strategy(config: &ChatConfig) -> Result<Arc<dyn ReplyStrategy>, ChatError> {
    let strategy: Arc<dyn ReplyStrategy> = match config.mode {
        ChatMode::Upstream => {
            let client = new_client(config)?;
            Arc::new(UpstreamReplier::new(config, client))
        }
        ChatMode::Canned => Arc::new(CannedReplier::new()),
    };
    Ok(strategy)
}
