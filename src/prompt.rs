use crate::types::{Transcript, Turn};

/// Render a transcript as one prompt string: each turn becomes
/// `"<Role>: <content>"`, joined by newlines in transcript order.
pub fn flatten(transcript: &Transcript) -> String {
    flatten_turns(transcript.turns())
}

pub fn flatten_turns(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|turn| format!("{}: {}", turn.role().label(), turn.content()))
        .collect::<Vec<_>>()
        .join("\n")
}
