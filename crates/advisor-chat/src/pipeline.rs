//! Composition root: wires chunker, embedder and index once at startup,
//! then drives retrieve → assemble → generate → append per question.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use advisor_core::chunker;
use advisor_core::error::{Error, Result};
use advisor_core::traits::{Embedder, Generator};
use advisor_core::types::Turn;
use advisor_index::{Retriever, VectorIndex};

use crate::history::ConversationHistory;
use crate::prompt::{assemble, HISTORY_WINDOW};

/// Knobs for the one-time index build and per-question retrieval. Defaults
/// follow the curriculum assistant's original tuning.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub document_path: PathBuf,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            document_path: PathBuf::from("curriculum_data.txt"),
            chunk_size: 1000,
            chunk_overlap: 200,
            top_k: 3,
        }
    }
}

/// One conversation session over one indexed document.
///
/// An explicit value owned by the caller; there is no ambient state. A value
/// of this type is always Ready: every failure on the way there surfaces
/// from `initialize` and the instance is never constructed. `ask` takes
/// `&mut self`, so one session processes one question at a time by
/// construction. The index content is immutable after build and may be
/// shared read-only; the history must not be.
pub struct Pipeline {
    retriever: Retriever,
    generator: Box<dyn Generator>,
    history: ConversationHistory,
    top_k: usize,
}

impl Pipeline {
    /// One-time blocking build: load document, chunk, embed, index.
    ///
    /// Fatal on a missing or empty document (`StartupFailure`), on an
    /// embedder that cannot produce vectors (`EmbeddingUnavailable`), and on
    /// bad chunking parameters (`InvalidConfig`). A failed instance cannot
    /// be repaired; discard it and retry startup.
    pub fn initialize(
        config: &PipelineConfig,
        embedder: Box<dyn Embedder>,
        generator: Box<dyn Generator>,
    ) -> Result<Self> {
        let raw = fs::read_to_string(&config.document_path).map_err(|e| {
            Error::StartupFailure(format!(
                "cannot read document {}: {e}",
                config.document_path.display()
            ))
        })?;
        if raw.trim().is_empty() {
            return Err(Error::StartupFailure(format!(
                "document {} is empty",
                config.document_path.display()
            )));
        }

        let chunks = chunker::split(&raw, config.chunk_size, config.chunk_overlap)?;
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = embedder
            .embed_batch(&texts)
            .map_err(|e| Error::EmbeddingUnavailable(e.to_string()))?;
        let index = VectorIndex::build(chunks.into_iter().zip(embeddings).collect())?;
        info!(
            chunks = index.len(),
            dim = embedder.dim(),
            document = %config.document_path.display(),
            "pipeline ready"
        );

        Ok(Self {
            retriever: Retriever::new(embedder, index),
            generator,
            history: ConversationHistory::new(),
            top_k: config.top_k,
        })
    }

    /// Answer one question grounded in the retrieved context plus the recent
    /// conversation window.
    ///
    /// On success both the user turn and the assistant turn are appended to
    /// the history. On failure nothing is appended, so retrying the same
    /// question reproduces the same prompt and the session stays usable.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        let context = self
            .retriever
            .retrieve(question, self.top_k)
            .map_err(|e| Error::EmbeddingUnavailable(e.to_string()))?;
        let window = self.history.recent_window(HISTORY_WINDOW);
        let prompt = assemble(question, &context, window);
        debug!(
            prompt_chars = prompt.len(),
            context_chunks = context.len(),
            window_turns = window.len(),
            "prompt assembled"
        );

        let answer = self
            .generator
            .generate(&prompt)
            .map_err(|e| Error::GenerationFailure(e.to_string()))?;

        self.history.append(Turn::user(question));
        self.history.append(Turn::assistant(answer.clone()));
        Ok(answer)
    }

    /// Full turn log for rendering; the grounding window stays bounded
    /// regardless of how long this grows.
    pub fn history(&self) -> &[Turn] {
        self.history.turns()
    }
}
