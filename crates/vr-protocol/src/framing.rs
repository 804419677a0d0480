//! Line framing.
//!
//! Commands end with `\r`. A `\n` is tolerated as a terminator too, so a
//! `\r\n` pair yields one command and an empty frame that is skipped.

/// Terminator appended to every reply.
pub const TERMINATOR: char = '\r';

fn is_terminator(c: char) -> bool {
    c == '\r' || c == '\n'
}

/// Split a complete input into command lines, skipping blank ones.
pub fn split_frames(input: &str) -> impl Iterator<Item = &str> {
    input
        .split(is_terminator)
        .filter(|line| !line.trim().is_empty())
}

/// Append the reply terminator.
pub fn encode_reply(reply: &str) -> String {
    let mut out = String::with_capacity(reply.len() + 1);
    out.push_str(reply);
    out.push(TERMINATOR);
    out
}

/// Incremental framer for input that arrives in arbitrary chunks.
#[derive(Debug, Default, Clone)]
pub struct FrameDecoder {
    pending: String,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk; returns every line completed by it.
    pub fn push(&mut self, chunk: &str) -> Vec<String> {
        self.pending.push_str(chunk);
        let Some(last) = self.pending.rfind(is_terminator) else {
            return Vec::new();
        };
        let rest = self.pending.split_off(last + 1);
        let complete = std::mem::replace(&mut self.pending, rest);
        split_frames(&complete).map(str::to_owned).collect()
    }

    /// Flush a final unterminated line, if any.
    pub fn finish(&mut self) -> Option<String> {
        let line = std::mem::take(&mut self.pending);
        (!line.trim().is_empty()).then_some(line)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
