//! Append-only conversation log, separate from any rendering concern.

use advisor_core::types::Turn;

/// Ordered sequence of turns owned by exactly one session.
///
/// The full log is kept for display; only the bounded recent window feeds
/// prompt assembly.
#[derive(Debug, Default)]
pub struct ConversationHistory {
    turns: Vec<Turn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always succeeds; turns are never removed or reordered.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// The last `n` turns in chronological order (oldest first within the
    /// window), or fewer when the history is shorter.
    pub fn recent_window(&self, n: usize) -> &[Turn] {
        &self.turns[self.turns.len().saturating_sub(n)..]
    }

    /// Read accessor over the full log, for rendering.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
