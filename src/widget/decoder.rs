use log::debug;

use crate::models::api::StreamFragment;
use crate::sse::{data_payload, LineBuffer, DONE_SENTINEL};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    Text(String),
    Done,
}

/// Incremental decoder for the `/api/chat` event stream.
///
/// Only `data: ` lines are considered. Payloads that are not valid JSON are
/// dropped without failing the stream, as are fragments with no text.
#[derive(Debug, Default)]
pub struct EventDecoder {
    lines: LineBuffer,
}

impl EventDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        self.lines
            .push(chunk)
            .iter()
            .filter_map(|line| decode_line(line))
            .collect()
    }

    /// Decodes a trailing line the server never terminated.
    pub fn finish(&mut self) -> Vec<StreamEvent> {
        self.lines
            .finish()
            .and_then(|line| decode_line(&line))
            .into_iter()
            .collect()
    }
}

fn decode_line(line: &str) -> Option<StreamEvent> {
    let data = data_payload(line)?;
    if data == DONE_SENTINEL {
        return Some(StreamEvent::Done);
    }
    match serde_json::from_str::<StreamFragment>(data) {
        Ok(fragment) => fragment
            .text
            .filter(|t| !t.is_empty())
            .map(StreamEvent::Text),
        Err(e) => {
            debug!("Skipping malformed event payload {:?}: {}", data, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_text_and_sentinel() {
        let mut decoder = EventDecoder::new();
        let events = decoder.feed(b"data: {\"text\":\"Hel\"}\n\ndata: {\"text\":\"lo\"}\n\ndata: [DONE]\n\n");
        assert_eq!(
            events,
            vec![
                StreamEvent::Text("Hel".into()),
                StreamEvent::Text("lo".into()),
                StreamEvent::Done
            ]
        );
    }

    #[test]
    fn malformed_and_foreign_lines_are_skipped() {
        let mut decoder = EventDecoder::new();
        let events = decoder.feed(
            b": comment\nevent: ping\ndata: {broken\n\ndata: {\"text\":\"\"}\n\ndata: {\"other\":1}\n\ndata: {\"text\":\"ok\"}\n\n",
        );
        assert_eq!(events, vec![StreamEvent::Text("ok".into())]);
    }

    #[test]
    fn event_split_across_chunks() {
        let mut decoder = EventDecoder::new();
        assert!(decoder.feed(b"data: {\"text\":").is_empty());
        assert_eq!(decoder.feed(b"\"there\"}\n\n"), vec![StreamEvent::Text("there".into())]);
    }

    #[test]
    fn finish_flushes_unterminated_line() {
        let mut decoder = EventDecoder::new();
        assert!(decoder.feed(b"data: [DONE]").is_empty());
        assert_eq!(decoder.finish(), vec![StreamEvent::Done]);
        assert!(decoder.finish().is_empty());
    }
}
