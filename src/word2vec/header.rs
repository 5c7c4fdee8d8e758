//! First line of a `syn0` entry: `"<dictionarySize> <vectorDimension>"`.

use std::str::FromStr;

use super::ModelError;

/// Declared counts of a model, read once before any record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelHeader {
    /// Number of terms the trainer claims to have written. Capacity hint only.
    pub dictionary_size: usize,
    /// Length every vector in the file must have.
    pub vector_dimension: usize,
}

impl ModelHeader {
    /// Parse the header line. Tokens past the second are ignored.
    pub fn parse(line: &str) -> Result<Self, ModelError> {
        let mut tokens = line.split(' ');

        let dictionary_size = Self::parse_count(line, tokens.next(), "dictionary size")?;
        let vector_dimension = Self::parse_count(line, tokens.next(), "vector dimension")?;

        Ok(Self {
            dictionary_size,
            vector_dimension,
        })
    }

    fn parse_count(line: &str, token: Option<&str>, what: &str) -> Result<usize, ModelError> {
        let token = match token {
            Some(token) if !token.is_empty() => token,
            _ => {
                return Err(ModelError::malformed_header(
                    line,
                    format!("expected two space separated counts, {what} is missing"),
                ))
            }
        };

        token.parse::<usize>().map_err(|e| {
            ModelError::malformed_header(line, format!("invalid {what} {token:?}: {e}"))
        })
    }
}

impl FromStr for ModelHeader {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
