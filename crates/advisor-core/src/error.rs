use thiserror::Error;

/// Failure taxonomy for the advisor pipeline.
///
/// `InvalidConfig` is a programmer error and fails fast.
/// `EmbeddingUnavailable`, `EmptyIndex` and `StartupFailure` are fatal to a
/// pipeline instance: discard it and retry startup from scratch.
/// `GenerationFailure` is per-question; the session stays usable and the
/// caller may ask again. No variant is retried internally.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Embedding model unavailable: {0}")]
    EmbeddingUnavailable(String),

    #[error("Vector index cannot be built from zero entries")]
    EmptyIndex,

    #[error("Startup failed: {0}")]
    StartupFailure(String),

    #[error("Generation failed: {0}")]
    GenerationFailure(String),
}

pub type Result<T> = std::result::Result<T, Error>;
