//! Term token encodings.
//!
//! DL4J writes terms either verbatim or, when asked to, as `B64:<payload>`.
//! Which one a file uses is only visible from the data itself, so the mode is
//! detected on the first record and then applied to every record of the file.

use base64::{
    alphabet,
    engine::{general_purpose::GeneralPurpose, DecodePaddingMode, GeneralPurposeConfig},
    Engine as _,
};
use serde::Serialize;

use super::{ModelError, Term};

/// Marker compared (case-insensitively) against the start of the first term.
const B64_MARKER: &str = "b64";

/// Marker plus its delimiter (`B64:`), stripped before decoding.
const B64_PREFIX_LEN: usize = B64_MARKER.len() + 1;

/// Standard alphabet; padding accepted but not required.
const TERM_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// How term tokens of one model file are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TermEncoding {
    #[default]
    Plain,
    Base64,
}

impl TermEncoding {
    /// Decide the encoding from the first term token of the file.
    ///
    /// Tokens shorter than the marker are plain.
    pub fn detect(first_token: &str) -> Self {
        let is_b64 = first_token
            .get(..B64_MARKER.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(B64_MARKER));

        if is_b64 {
            TermEncoding::Base64
        } else {
            TermEncoding::Plain
        }
    }

    /// Decode one term token.
    ///
    /// In Base64 mode the fixed-width prefix is stripped whether or not the
    /// token actually carries the marker.
    pub fn decode(self, token: &str, line_number: usize) -> Result<Term, ModelError> {
        match self {
            TermEncoding::Plain => Ok(Term::from(token)),
            TermEncoding::Base64 => {
                let payload = token.get(B64_PREFIX_LEN..).ok_or_else(|| ModelError::InvalidTerm {
                    line_number,
                    token: token.to_string(),
                    reason: format!("shorter than the {B64_PREFIX_LEN} character base64 prefix"),
                })?;

                TERM_ENGINE
                    .decode(payload)
                    .map(Term::from)
                    .map_err(|e| ModelError::InvalidTerm {
                        line_number,
                        token: token.to_string(),
                        reason: format!("invalid base64: {e}"),
                    })
            }
        }
    }
}
