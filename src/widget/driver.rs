use futures::StreamExt;
use log::info;

use super::transport::{ChatResponse, ChatTransport};
use super::{ChatWidget, Effect, ExchangeOutcome, SendRejection, WidgetEvent};

/// Sends the composer contents and feeds the reply stream into the widget
/// until the exchange finishes. `on_update` runs after every visible change.
///
/// The exchange stops early when the widget's cancel handle fires; dropping
/// the returned future also stops reading.
pub async fn run_exchange<T, F>(
    widget: &mut ChatWidget,
    transport: &T,
    mut on_update: F,
) -> Result<ExchangeOutcome, SendRejection>
where
    T: ChatTransport + ?Sized,
    F: FnMut(&ChatWidget),
{
    let (body, cancel) = match widget.handle(WidgetEvent::Send) {
        Effect::Request { body, cancel } => (body, cancel),
        Effect::Rejected(reason) => return Err(reason),
        _ => return Err(SendRejection::Busy),
    };
    on_update(widget);
    info!("Sending {} turn(s) to the chat endpoint", body.messages.len());

    let opened = tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        res = transport.open(&body) => Some(res),
    };

    let mut bytes = match opened {
        None => return Ok(conclude(widget, WidgetEvent::CancelRequested, &mut on_update)),
        Some(Err(e)) => {
            return Ok(conclude(widget, WidgetEvent::ErrorReceived(e.to_string()), &mut on_update));
        }
        Some(Ok(ChatResponse::Reply(text))) => {
            return Ok(conclude(widget, WidgetEvent::ReplyReceived(text), &mut on_update));
        }
        Some(Ok(ChatResponse::Stream(stream))) => stream,
    };

    if let Effect::Updated = widget.handle(WidgetEvent::StreamOpened) {
        on_update(widget);
    }

    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            chunk = bytes.next() => Some(chunk),
        };

        let event = match next {
            None => return Ok(conclude(widget, WidgetEvent::CancelRequested, &mut on_update)),
            Some(None) => return Ok(conclude(widget, WidgetEvent::StreamEnded, &mut on_update)),
            Some(Some(Err(e))) => {
                return Ok(conclude(widget, WidgetEvent::ErrorReceived(e.to_string()), &mut on_update));
            }
            Some(Some(Ok(chunk))) => WidgetEvent::Chunk(chunk),
        };

        match widget.handle(event) {
            Effect::Finished(outcome) => {
                on_update(widget);
                return Ok(outcome);
            }
            Effect::Updated => on_update(widget),
            _ => {}
        }
    }
}

/// Applies a terminal event. If the widget had already settled, the exchange
/// counts as cancelled.
fn conclude<F>(widget: &mut ChatWidget, event: WidgetEvent, on_update: &mut F) -> ExchangeOutcome
where
    F: FnMut(&ChatWidget),
{
    let outcome = match widget.handle(event) {
        Effect::Finished(outcome) => outcome,
        _ => ExchangeOutcome::Cancelled,
    };
    on_update(widget);
    outcome
}
