//! Loading of word2vec models for synonym expansion.
//!
//! - [`word2vec`]: reads DL4J model archives into a term → vector dictionary
//! - [`doc_values`]: per-document float values for scoring
//! - [`config`]: YAML configuration of the `synvec` binary

pub mod config;
pub mod doc_values;
pub mod word2vec;

#[cfg(test)]
mod tests;
