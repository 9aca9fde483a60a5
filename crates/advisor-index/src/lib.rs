#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod index;
pub mod retriever;

pub use index::{cosine_similarity, VectorIndex};
pub use retriever::Retriever;
