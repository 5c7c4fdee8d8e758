use std::num::ParseFloatError;

use super::MODEL_FILE_NAME_PREFIX;

/// Errors that can occur while loading a DL4J word2vec model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error(
        "Cannot read Dl4j word2vec model - '{prefix}' file is missing in the zip. \
         '{prefix}' is a mandatory file containing the mapping between terms and vectors \
         generated by the DL4j library."
    )]
    MissingModelFile { prefix: &'static str },

    #[error("Malformed model header {line:?}: {reason}")]
    MalformedHeader { line: String, reason: String },

    #[error(
        "Word2Vec model file corrupted. Declared vectors of size {expected} but found \
         vector of size {found} for word {token} ({term})"
    )]
    DimensionMismatch {
        expected: usize,
        found: usize,
        token: String,
        term: String,
    },

    #[error("Invalid vector component {token:?} on line {line_number}: {source}")]
    MalformedNumber {
        line_number: usize,
        token: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("Invalid term {token:?} on line {line_number}: {reason}")]
    InvalidTerm {
        line_number: usize,
        token: String,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Archive(#[source] zip::result::ZipError),
}

impl ModelError {
    pub(crate) fn missing_model_file() -> Self {
        Self::MissingModelFile {
            prefix: MODEL_FILE_NAME_PREFIX,
        }
    }

    pub(crate) fn malformed_header(line: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedHeader {
            line: line.into(),
            reason: reason.into(),
        }
    }
}

impl From<zip::result::ZipError> for ModelError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Self::Io(e),
            other => Self::Archive(other),
        }
    }
}
