//! Client side of the chat: the message list, the composer and the single
//! in-flight exchange, driven by explicit events.

pub mod decoder;
pub mod driver;
pub mod transport;

use bytes::Bytes;
use log::{debug, warn};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::models::api::ChatRequest;
use crate::models::chat::{ChatMessage, Conversation, Role};
use decoder::{EventDecoder, StreamEvent};

pub use driver::run_exchange;
pub use transport::{ChatResponse, ChatTransport, HttpTransport};

pub const GREETING: &str = "Hi, I'm Tim's AI assistant 👋 Want to explore his work? Ask me about his projects, skills, or background!";

pub const APOLOGY: &str = "Sorry, I'm having trouble connecting right now. Please try again!";

pub const SUGGESTED_QUESTIONS: [&str; 4] = [
    "What projects have you built?",
    "Tell me about your education",
    "What tech stack do you use?",
    "How can I contact you?",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Collapsed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingResponse,
}

#[derive(Debug)]
pub enum WidgetEvent {
    Send,
    StreamOpened,
    Chunk(Bytes),
    /// A complete reply delivered in one piece.
    ReplyReceived(String),
    DoneReceived,
    StreamEnded,
    ErrorReceived(String),
    CancelRequested,
    OpenRequested,
    CloseRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendRejection {
    EmptyInput,
    Busy,
    Collapsed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeOutcome {
    /// The `[DONE]` sentinel arrived, or a whole reply did.
    Completed,
    /// The stream closed without the sentinel. Partial text is kept.
    Interrupted,
    /// Transport or HTTP failure; the apology message was appended.
    Failed(String),
    /// Stopped on request; nothing was appended.
    Cancelled,
}

/// What the caller has to do after an event.
#[derive(Debug)]
pub enum Effect {
    None,
    /// Post `body` to the chat endpoint; stop reading once `cancel` fires.
    Request {
        body: ChatRequest,
        cancel: CancellationToken,
    },
    Rejected(SendRejection),
    /// The visible message list changed.
    Updated,
    Finished(ExchangeOutcome),
}

#[derive(Debug)]
struct Exchange {
    placeholder: Option<Uuid>,
    accumulated: String,
    decoder: EventDecoder,
    cancel: CancellationToken,
}

#[derive(Debug)]
enum ExchangeState {
    Idle,
    AwaitingResponse(Exchange),
}

#[derive(Debug)]
pub struct ChatWidget {
    conversation: Conversation,
    input: String,
    visibility: Visibility,
    state: ExchangeState,
}

impl Default for ChatWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatWidget {
    pub fn new() -> Self {
        Self {
            conversation: Conversation::with_greeting(GREETING),
            input: String::new(),
            visibility: Visibility::Collapsed,
            state: ExchangeState::Idle,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            ExchangeState::Idle => Phase::Idle,
            ExchangeState::AwaitingResponse(_) => Phase::AwaitingResponse,
        }
    }

    /// Whether the send control is enabled.
    pub fn can_send(&self) -> bool {
        self.check_send().is_ok()
    }

    /// Starter prompts, offered only before the first exchange.
    pub fn suggestions(&self) -> &'static [&'static str] {
        if self.conversation.only_greeting() {
            &SUGGESTED_QUESTIONS
        } else {
            &[]
        }
    }

    /// Copies a suggested question into the composer.
    pub fn pick_suggestion(&mut self, index: usize) -> bool {
        match self.suggestions().get(index) {
            Some(q) => {
                self.input = q.to_string();
                true
            }
            None => false,
        }
    }

    /// Handle for stopping the in-flight exchange from elsewhere.
    pub fn cancel_handle(&self) -> Option<CancellationToken> {
        match &self.state {
            ExchangeState::AwaitingResponse(ex) => Some(ex.cancel.clone()),
            ExchangeState::Idle => None,
        }
    }

    pub fn handle(&mut self, event: WidgetEvent) -> Effect {
        match event {
            WidgetEvent::Send => self.begin_send(),
            WidgetEvent::StreamOpened => self.open_placeholder(),
            WidgetEvent::Chunk(bytes) => self.apply_chunk(&bytes),
            WidgetEvent::ReplyReceived(text) => self.apply_reply(text),
            WidgetEvent::DoneReceived => self.finish(ExchangeOutcome::Completed),
            WidgetEvent::StreamEnded => self.end_of_stream(),
            WidgetEvent::ErrorReceived(reason) => self.fail(reason),
            WidgetEvent::CancelRequested => self.cancel(),
            WidgetEvent::OpenRequested => {
                if self.visibility == Visibility::Open {
                    return Effect::None;
                }
                self.visibility = Visibility::Open;
                Effect::Updated
            }
            WidgetEvent::CloseRequested => {
                self.visibility = Visibility::Collapsed;
                match self.state {
                    ExchangeState::AwaitingResponse(_) => self.cancel(),
                    ExchangeState::Idle => Effect::Updated,
                }
            }
        }
    }

    fn check_send(&self) -> Result<(), SendRejection> {
        if matches!(self.state, ExchangeState::AwaitingResponse(_)) {
            return Err(SendRejection::Busy);
        }
        if self.visibility == Visibility::Collapsed {
            return Err(SendRejection::Collapsed);
        }
        if self.input.trim().is_empty() {
            return Err(SendRejection::EmptyInput);
        }
        Ok(())
    }

    fn begin_send(&mut self) -> Effect {
        if let Err(reason) = self.check_send() {
            debug!("Send rejected: {:?}", reason);
            return Effect::Rejected(reason);
        }

        let text = std::mem::take(&mut self.input);
        self.conversation.push(ChatMessage::new(Role::User, text));

        let cancel = CancellationToken::new();
        self.state = ExchangeState::AwaitingResponse(Exchange {
            placeholder: None,
            accumulated: String::new(),
            decoder: EventDecoder::new(),
            cancel: cancel.clone(),
        });

        Effect::Request {
            body: self.conversation.to_request(),
            cancel,
        }
    }

    fn open_placeholder(&mut self) -> Effect {
        let ExchangeState::AwaitingResponse(ex) = &mut self.state else {
            return Effect::None;
        };
        if ex.placeholder.is_some() {
            return Effect::None;
        }
        ex.placeholder = Some(
            self.conversation
                .push(ChatMessage::new(Role::Assistant, String::new())),
        );
        Effect::Updated
    }

    fn apply_chunk(&mut self, chunk: &[u8]) -> Effect {
        self.open_placeholder();
        let events = match &mut self.state {
            ExchangeState::AwaitingResponse(ex) => ex.decoder.feed(chunk),
            ExchangeState::Idle => return Effect::None,
        };
        self.apply_events(events)
    }

    fn apply_reply(&mut self, text: String) -> Effect {
        self.open_placeholder();
        self.apply_events(vec![StreamEvent::Text(text)]);
        self.finish(ExchangeOutcome::Completed)
    }

    fn end_of_stream(&mut self) -> Effect {
        let events = match &mut self.state {
            ExchangeState::AwaitingResponse(ex) => ex.decoder.finish(),
            ExchangeState::Idle => return Effect::None,
        };
        match self.apply_events(events) {
            Effect::Finished(outcome) => Effect::Finished(outcome),
            _ => {
                warn!("Reply stream closed without the end-of-stream sentinel");
                self.finish(ExchangeOutcome::Interrupted)
            }
        }
    }

    fn apply_events(&mut self, events: Vec<StreamEvent>) -> Effect {
        let mut changed = false;
        for event in events {
            match event {
                StreamEvent::Done => return self.finish(ExchangeOutcome::Completed),
                StreamEvent::Text(text) => {
                    let ExchangeState::AwaitingResponse(ex) = &mut self.state else {
                        return Effect::None;
                    };
                    ex.accumulated.push_str(&text);
                    if let Some(msg) = ex
                        .placeholder
                        .and_then(|id| self.conversation.get_mut(id))
                    {
                        msg.text.clone_from(&ex.accumulated);
                        changed = true;
                    }
                }
            }
        }
        if changed {
            Effect::Updated
        } else {
            Effect::None
        }
    }

    fn fail(&mut self, reason: String) -> Effect {
        if matches!(self.state, ExchangeState::Idle) {
            return Effect::None;
        }
        warn!("Chat exchange failed: {}", reason);
        self.conversation
            .push(ChatMessage::new(Role::Assistant, APOLOGY));
        self.finish(ExchangeOutcome::Failed(reason))
    }

    fn cancel(&mut self) -> Effect {
        match &self.state {
            ExchangeState::AwaitingResponse(ex) => ex.cancel.cancel(),
            ExchangeState::Idle => return Effect::None,
        }
        debug!("Chat exchange cancelled");
        self.finish(ExchangeOutcome::Cancelled)
    }

    fn finish(&mut self, outcome: ExchangeOutcome) -> Effect {
        if matches!(self.state, ExchangeState::Idle) {
            return Effect::None;
        }
        self.state = ExchangeState::Idle;
        Effect::Finished(outcome)
    }
}
