//! Decoding of `"<term> <f0> <f1> ... <f(d-1)>"` records.

use super::{ModelError, TermAndVector, TermEncoding};

/// Split a line on single spaces, dropping trailing empty tokens.
///
/// Interior empty tokens are kept, so doubled spaces inside a record surface
/// as malformed numbers instead of being silently merged.
pub(crate) fn split_tokens(line: &str) -> impl Iterator<Item = &str> {
    line.trim_end_matches(' ').split(' ')
}

/// Decode one data line into a record.
///
/// `line_number` is 1-based and counts the header, it only feeds diagnostics.
pub fn decode_record(
    line: &str,
    line_number: usize,
    vector_dimension: usize,
    encoding: TermEncoding,
) -> Result<TermAndVector, ModelError> {
    let mut tokens = split_tokens(line);
    // split always yields at least one token
    let term_token = tokens.next().unwrap_or_default();
    let term = encoding.decode(term_token, line_number)?;

    // sized by what the line holds, never by the declared dimension
    let vector = tokens
        .map(|token| {
            token
                .parse::<f32>()
                .map_err(|source| ModelError::MalformedNumber {
                    line_number,
                    token: token.to_string(),
                    source,
                })
        })
        .collect::<Result<Vec<f32>, ModelError>>()?;

    if vector.len() != vector_dimension {
        return Err(ModelError::DimensionMismatch {
            expected: vector_dimension,
            found: vector.len(),
            token: term_token.to_string(),
            term: term.to_string_lossy(),
        });
    }

    Ok(TermAndVector::new(term, vector))
}
