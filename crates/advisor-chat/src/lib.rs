#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod generate;
pub mod history;
pub mod pipeline;
pub mod prompt;

pub use generate::GeminiClient;
pub use history::ConversationHistory;
pub use pipeline::{Pipeline, PipelineConfig};
