pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;

    /// Map text to a fixed-dimension vector. Same text, same vector.
    fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>>;

    /// Order-preserving batch variant: one vector per input text.
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

pub trait Generator: Send + Sync {
    /// Send a fully assembled prompt to the generative model and return its
    /// text verbatim. Blocking; no retries, no streaming.
    fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}
