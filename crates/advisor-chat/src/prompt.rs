//! Grounded prompt assembly.
//!
//! Pure string composition: instruction preamble, recent conversation
//! window, retrieved context, then the literal question. No I/O.

use std::fmt::Write as _;

use advisor_core::types::{Chunk, Role, Turn};

/// Turns of history included in the grounding context: 2 user/assistant
/// exchanges. Older turns are deliberately excluded to bound prompt size;
/// the full log is still available for display.
pub const HISTORY_WINDOW: usize = 4;

const PREAMBLE: &str = "You are a helpful academic advisor for the Computer Science department.\n\
\n\
INSTRUCTIONS:\n\
1. Answer the user's question based on the Curriculum Context below.\n\
2. If the answer is not in the context, say you don't know.\n\
3. Keep answers concise and helpful.";

/// Compose the single text blob sent to the generative model. Context chunks
/// stay in the retrieval order supplied (most relevant first), joined by
/// blank lines; history renders as alternating `User:` / `AI:` lines.
pub fn assemble(question: &str, context_chunks: &[Chunk], history_window: &[Turn]) -> String {
    let mut history_text = String::new();
    for turn in history_window {
        let label = match turn.role {
            Role::User => "User",
            Role::Assistant => "AI",
        };
        let _ = writeln!(history_text, "{label}: {}", turn.text);
    }

    let context_text = context_chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "{PREAMBLE}\n\n\
--- CHAT HISTORY ---\n\
{history_text}\n\
--- CURRICULUM CONTEXT ---\n\
{context_text}\n\n\
--- USER QUESTION ---\n\
{question}\n\n\
ANSWER:"
    )
}
