pub mod openai;

use async_trait::async_trait;
use futures::{Future, Stream};
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use self::openai::OpenAIChatClient;
use crate::config::ChatConfig;
use crate::error::ChatError;
use crate::models::chat::ChatTurn;

/// Incremental reply text. Items are never empty strings.
pub type TokenStream = Pin<Box<dyn Stream<Item = Result<String, ChatError>> + Send>>;

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Opens a streaming completion. Errors that happen before the first byte
    /// of the reply (connection, non-success status) are returned here;
    /// anything later arrives as an `Err` item on the stream.
    async fn stream_chat(&self, messages: Vec<ChatTurn>) -> Result<TokenStream, ChatError>;

    fn get_model(&self) -> String;
}

pub fn create_streaming_response<F, Fut>(response_fn: F) -> TokenStream
where
    F: FnOnce(mpsc::Sender<Result<String, ChatError>>) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let (tx, rx) = mpsc::channel(32);

    tokio::spawn(async move {
        response_fn(tx).await;
    });

    Box::pin(ReceiverStream::new(rx))
}

pub fn new_client(config: &ChatConfig) -> Result<Arc<dyn ChatClient>, ChatError> {
    let client = OpenAIChatClient::from_config(config)?;
    Ok(Arc::new(client))
}
