//! Splits raw document text into overlapping, retrieval-sized chunks.
//!
//! Sizes are measured in characters, not bytes, so multi-byte input never
//! gets cut inside a code point. Break points prefer paragraph, then
//! sentence, then line, then word boundaries before falling back to a hard
//! character cut. Every character of the input lands in at least one chunk.

use tracing::debug;

use crate::error::{Error, Result};
use crate::types::Chunk;

/// Split `text` into consecutive chunks of at most `size` characters, each
/// chunk after the first starting exactly `overlap` characters before the
/// previous chunk's end.
///
/// Deterministic: the same input and parameters always yield the same
/// sequence. Fails with `InvalidConfig` when `size == 0` or `overlap >= size`.
pub fn split(text: &str, size: usize, overlap: usize) -> Result<Vec<Chunk>> {
    if size == 0 {
        return Err(Error::InvalidConfig("chunk size must be positive".to_string()));
    }
    if overlap >= size {
        return Err(Error::InvalidConfig(format!(
            "chunk overlap ({overlap}) must be smaller than chunk size ({size})"
        )));
    }

    // Byte offset of every char start, plus an end sentinel, so char-indexed
    // windows can be sliced without scanning.
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let total_chars = bounds.len() - 1;
    if total_chars == 0 {
        return Ok(Vec::new());
    }

    let mut chunks = Vec::new();
    let mut start = 0usize;
    while start < total_chars {
        let hard_end = (start + size).min(total_chars);
        let end = if hard_end < total_chars {
            let window = &text[bounds[start]..bounds[hard_end]];
            match find_break_point(window, size, overlap) {
                Some(chars_into_window) => start + chars_into_window,
                None => hard_end,
            }
        } else {
            hard_end
        };

        chunks.push(Chunk {
            text: text[bounds[start]..bounds[end]].to_string(),
            index: chunks.len(),
        });

        if end >= total_chars {
            break;
        }
        // Any accepted break is more than `overlap` chars into the window,
        // so this never underflows and the overlap stays exact.
        start = end - overlap;
    }

    debug!(chunks = chunks.len(), size, overlap, "document split");
    Ok(chunks)
}

/// Find a good break point inside `window`, returned as a count of
/// characters from the window start. Prefers paragraph, then sentence, then
/// line, then word boundaries; `None` means take the whole window.
///
/// A break at or before `overlap` chars would make the next chunk start at
/// or before the current one, so such boundaries are skipped and the hard
/// cut applies.
fn find_break_point(window: &str, size: usize, overlap: usize) -> Option<usize> {
    let min_chars = (size / 3).max(overlap);

    // Paragraph boundary (double newline).
    if let Some(pos) = window.rfind("\n\n") {
        let chars = char_offset(window, pos + 2);
        if chars > min_chars {
            return Some(chars);
        }
    }

    // Sentence boundary.
    for pattern in &[". ", "! ", "? ", ".\n", "!\n", "?\n"] {
        if let Some(pos) = window.rfind(pattern) {
            let chars = char_offset(window, pos + pattern.len());
            if chars > min_chars {
                return Some(chars);
            }
        }
    }

    // Any line break.
    if let Some(pos) = window.rfind('\n') {
        let chars = char_offset(window, pos + 1);
        if chars > min_chars {
            return Some(chars);
        }
    }

    // Word boundary.
    if let Some(pos) = window.rfind(' ') {
        let chars = char_offset(window, pos + 1);
        if chars > overlap {
            return Some(chars);
        }
    }

    None
}

fn char_offset(s: &str, byte_pos: usize) -> usize {
    s[..byte_pos].chars().count()
}
