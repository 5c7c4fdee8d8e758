//! Loading of word2vec models exported by Deeplearning4j.
//!
//! DL4J ships a model as a zip archive. The only entry used here is the one
//! whose name starts with `syn0`: a text file with a `"<size> <dimension>"`
//! header followed by one `"<term> <f0> ... <f(d-1)>"` record per line.
//!
//! # Architecture
//!
//! - `archive`: finds the `syn0` entry in the zip stream
//! - `header`: parses the size/dimension header line
//! - `encoding`: plain vs. Base64 term tokens, detected from the first record
//! - `record`: decodes and validates one record
//! - `model`: the resulting term → vector dictionary
//! - `reader`: ties the above together

mod archive;
mod encoding;
mod error;
mod header;
mod model;
mod reader;
mod record;

pub use encoding::TermEncoding;
pub use error::ModelError;
pub use header::ModelHeader;
pub use model::{Term, TermAndVector, Word2VecModel, Word2VecModelBuilder};
pub use reader::{load_model, read_model_entry, Dl4jModelReader};
pub use record::decode_record;

/// Name prefix of the mandatory archive entry holding terms and vectors.
pub const MODEL_FILE_NAME_PREFIX: &str = "syn0";
