//! Terminal chat front end for the curriculum advisor pipeline.
//!
//! Presentation only: loads config, builds one pipeline instance, then
//! renders questions and answers. All retrieval and generation semantics
//! live in the library crates.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::error;

use advisor_chat::{GeminiClient, Pipeline, PipelineConfig};
use advisor_core::config::{expand_path, Config};
use advisor_core::traits::Embedder;
use advisor_core::Error;
use advisor_embed::default_embedder;

#[derive(Parser, Debug)]
#[command(
    name = "advisor",
    about = "Chat with a curriculum document: retrieval-grounded answers from a local index"
)]
struct AdvisorCli {
    /// Curriculum text file (falls back to config key data.curriculum_path)
    #[arg(long)]
    document: Option<PathBuf>,

    /// Ask a single question and exit instead of starting the chat loop
    #[arg(long)]
    ask: Option<String>,

    /// Number of chunks retrieved per question
    #[arg(long)]
    top_k: Option<usize>,

    /// Maximum chunk size in characters
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Overlap between consecutive chunks in characters
    #[arg(long)]
    chunk_overlap: Option<usize>,

    /// Gemini model identifier
    #[arg(long, env = "ADVISOR_MODEL")]
    model: Option<String>,

    /// Decoding temperature for the answering model
    #[arg(long)]
    temperature: Option<f32>,

    /// Google Generative Language API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = AdvisorCli::parse();
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;

    let defaults = PipelineConfig::default();
    let pipeline_config = PipelineConfig {
        document_path: cli.document.unwrap_or_else(|| {
            expand_path(config.get_or(
                "data.curriculum_path",
                defaults.document_path.to_string_lossy().to_string(),
            ))
        }),
        chunk_size: cli
            .chunk_size
            .unwrap_or_else(|| config.get_or("rag.chunk_size", defaults.chunk_size)),
        chunk_overlap: cli
            .chunk_overlap
            .unwrap_or_else(|| config.get_or("rag.chunk_overlap", defaults.chunk_overlap)),
        top_k: cli.top_k.unwrap_or_else(|| config.get_or("rag.top_k", defaults.top_k)),
    };
    let model = cli
        .model
        .unwrap_or_else(|| config.get_or("gemini.model", "gemini-2.5-flash-lite".to_string()));
    let temperature = cli
        .temperature
        .unwrap_or_else(|| config.get_or("gemini.temperature", 0.3));

    let generator = GeminiClient::new(cli.api_key, model, temperature)?;

    // A missing embedding model is a fatal startup condition like any other.
    let embedder = match build_embedder() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Startup failed: {e}");
            std::process::exit(1);
        }
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message("Loading curriculum...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    let pipeline = Pipeline::initialize(&pipeline_config, embedder, Box::new(generator));
    spinner.finish_and_clear();

    let mut pipeline = match pipeline {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Startup failed: {e}");
            std::process::exit(1);
        }
    };
    if let Some(question) = cli.ask {
        let answer = pipeline.ask(&question)?;
        println!("{answer}");
        return Ok(());
    }

    println!("System ready. Ask about the curriculum (\"exit\" to quit).");
    chat_loop(&mut pipeline)
}

fn build_embedder() -> advisor_core::Result<Box<dyn Embedder>> {
    default_embedder().map_err(|e| Error::EmbeddingUnavailable(e.to_string()))
}

fn chat_loop(pipeline: &mut Pipeline) -> Result<()> {
    let stdin = io::stdin();
    loop {
        print!("You: ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            break;
        }

        match pipeline.ask(question) {
            Ok(answer) => println!("AI: {answer}\n"),
            Err(e @ Error::GenerationFailure(_)) => {
                // Per-question failure: the session stays usable.
                error!(%e, "generation failed");
                eprintln!("The model could not answer ({e}). Try again.");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
