//! Line-level helpers for the `data: <payload>\n\n` event framing used both by
//! the upstream completion API and by our own `/api/chat` stream.

/// Prefix every payload line carries.
pub const DATA_PREFIX: &str = "data: ";

/// Payload that marks the end of a stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Returns the payload of a `data: ` line, or `None` for any other line
/// (blank separators, comments, other fields).
pub fn data_payload(line: &str) -> Option<&str> {
    line.strip_prefix(DATA_PREFIX)
}

/// Accumulates raw bytes and hands back complete lines.
///
/// Network chunks do not respect line boundaries, so a trailing partial line
/// is kept until the next chunk completes it. Splitting happens on bytes, so a
/// multi-byte character cut in half by the transport is reassembled before
/// decoding.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let mut line: Vec<u8> = self.pending.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }

    /// Flushes whatever is left once the byte stream has ended.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.pending);
        Some(String::from_utf8_lossy(&rest).into_owned())
    }
}
