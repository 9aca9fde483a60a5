//! Local sentence embeddings on candle.
//!
//! Loads an all-MiniLM-L6-v2 style BERT checkpoint from a local model
//! directory and produces masked-mean-pooled, L2-normalized 384-dim vectors.
//! `APP_USE_FAKE_EMBEDDINGS=1` swaps in a deterministic hash-based embedder
//! so tests never need model weights.

use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use std::time::Instant;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig, DTYPE};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use advisor_core::traits::Embedder;

mod device;
mod pool;
mod tokenize;

pub use device::select_device;
pub use pool::masked_mean_pool;
pub use tokenize::tokenize_on_device;

/// Embedding width of all-MiniLM-L6-v2; the fake embedder matches it.
pub const EMBEDDING_DIM: usize = 384;

const MAX_TOKENS: usize = 256;

pub struct MiniLmEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    dim: usize,
}

impl MiniLmEmbedder {
    pub fn new() -> Result<Self> {
        let device = select_device();
        let model_dir = resolve_model_dir()?;
        info!(dir = %model_dir.display(), "loading MiniLM embedding model");

        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            anyhow!("Failed to load tokenizer from {}: {}", tokenizer_path.display(), e)
        })?;

        let config_path = model_dir.join("config.json");
        let config_json = std::fs::read_to_string(&config_path)?;
        let config: BertConfig = serde_json::from_str(&config_json)?;
        // Config keeps its fields to itself; read the width off the raw JSON.
        let dim = serde_json::from_str::<serde_json::Value>(&config_json)?
            .get("hidden_size")
            .and_then(serde_json::Value::as_u64)
            .map_or(EMBEDDING_DIM, |v| v as usize);

        let model = load_weights(&model_dir, &config, &device)?;
        info!(dim, "embedding model ready");
        Ok(Self { model, tokenizer, device, dim })
    }
}

fn load_weights(model_dir: &Path, config: &BertConfig, device: &Device) -> Result<BertModel> {
    let safetensors = model_dir.join("model.safetensors");
    if safetensors.exists() {
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[safetensors], DTYPE, device)? };
        return Ok(BertModel::load(vb, config)?);
    }
    // Older checkpoints ship pickled weights only.
    let pickled = model_dir.join("pytorch_model.bin");
    let weights = candle_core::pickle::read_all(&pickled)?;
    let weights_map: std::collections::HashMap<String, Tensor> = weights.into_iter().collect();
    let vb = VarBuilder::from_tensors(weights_map, DTYPE, device);
    Ok(BertModel::load(vb, config)?)
}

impl Embedder for MiniLmEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let start = Instant::now();
        let (input_ids, attention_mask) =
            tokenize_on_device(&self.tokenizer, text, MAX_TOKENS, &self.device)?;
        let token_type_ids = Tensor::zeros((1, MAX_TOKENS), DType::U32, &self.device)?;
        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let pooled = masked_mean_pool(&hidden, &attention_mask)?;
        let vector: Vec<f32> = pooled.to_device(&Device::Cpu)?.squeeze(0)?.to_vec1()?;
        debug_assert_eq!(vector.len(), self.dim);
        if start.elapsed().as_millis() > 100 {
            warn!(elapsed_ms = start.elapsed().as_millis(), "slow embedding");
        }
        Ok(vector)
    }
}

/// Deterministic bag-of-words embedder for tests: hashes each whitespace
/// token into a bucket and L2-normalizes the result. Shared tokens produce
/// correlated vectors, which is all nearest-neighbor tests need.
struct FakeEmbedder {
    dim: usize,
}

impl FakeEmbedder {
    fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Embedder for FakeEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        use std::hash::{Hash, Hasher};
        use twox_hash::XxHash64;

        let mut v = vec![0f32; self.dim];
        for (i, token) in text.split_whitespace().enumerate() {
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            v[idx] += val + (i as f32 % 3.0) * 0.01;
        }
        let norm = (v.iter().map(|x| x * x).sum::<f32>()).sqrt().max(1e-6);
        for x in &mut v {
            *x /= norm;
        }
        Ok(v)
    }
}

/// Build the embedder the rest of the pipeline should use.
///
/// `APP_USE_FAKE_EMBEDDINGS=1` (or `true`) forces the hash-based test
/// embedder; anything else loads the local MiniLM checkpoint.
pub fn default_embedder() -> Result<Box<dyn Embedder>> {
    let use_fake = std::env::var("APP_USE_FAKE_EMBEDDINGS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    if use_fake {
        debug!("using fake hash-based embedder");
        return Ok(Box::new(FakeEmbedder::new(EMBEDDING_DIM)));
    }
    Ok(Box::new(MiniLmEmbedder::new()?))
}

fn resolve_model_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("APP_MODEL_DIR") {
        let p = PathBuf::from(&dir);
        if p.exists() {
            return Ok(p);
        }
    }
    if let Ok(dir) = std::env::var("MODEL_DIR") {
        let p = PathBuf::from(&dir);
        if p.exists() {
            return Ok(p);
        }
    }
    let default = Path::new("models/all-MiniLM-L6-v2");
    if default.exists() {
        return Ok(default.to_path_buf());
    }
    Err(anyhow!(
        "Could not locate the MiniLM model directory; set APP_MODEL_DIR"
    ))
}
