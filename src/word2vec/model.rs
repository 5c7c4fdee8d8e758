//! In-memory term → vector dictionary.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use super::{ModelError, ModelHeader, TermEncoding};

/// Upper bound on the records reserved up front from the declared size.
const MAX_PREALLOCATED_TERMS: usize = 1 << 16;

/// A term as written by the trainer. Raw bytes: Base64 terms need not be UTF-8.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Term(Vec<u8>);

impl Term {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Text form of the term, replacing invalid UTF-8 sequences.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

impl From<Vec<u8>> for Term {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Term {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<&str> for Term {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl AsRef<[u8]> for Term {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Borrow<[u8]> for Term {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Term({:?})", self.to_string_lossy())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

/// One record of the model file.
#[derive(Debug, Clone, PartialEq)]
pub struct TermAndVector {
    term: Term,
    vector: Vec<f32>,
}

impl TermAndVector {
    pub fn new(term: Term, vector: Vec<f32>) -> Self {
        Self { term, vector }
    }

    pub fn term(&self) -> &Term {
        &self.term
    }

    pub fn vector(&self) -> &[f32] {
        &self.vector
    }

    pub fn dimension(&self) -> usize {
        self.vector.len()
    }

    pub fn into_parts(self) -> (Term, Vec<f32>) {
        (self.term, self.vector)
    }
}

/// Accumulates records while a model file is being read.
///
/// Only [`finish`](Self::finish) turns it into a [`Word2VecModel`], so a read
/// that fails half-way has nothing to hand out.
#[derive(Debug)]
pub struct Word2VecModelBuilder {
    header: ModelHeader,
    encoding: TermEncoding,
    terms: Vec<TermAndVector>,
}

impl Word2VecModelBuilder {
    pub fn new(header: ModelHeader) -> Self {
        Self {
            header,
            encoding: TermEncoding::default(),
            terms: Vec::with_capacity(header.dictionary_size.min(MAX_PREALLOCATED_TERMS)),
        }
    }

    pub fn header(&self) -> ModelHeader {
        self.header
    }

    pub fn set_encoding(&mut self, encoding: TermEncoding) {
        self.encoding = encoding;
    }

    /// Append one record. Duplicate terms are kept as separate entries.
    ///
    /// Rejects vectors whose length differs from the declared dimension.
    pub fn add_term_and_vector(&mut self, entry: TermAndVector) -> Result<(), ModelError> {
        if entry.dimension() != self.header.vector_dimension {
            let term = entry.term().to_string_lossy();
            return Err(ModelError::DimensionMismatch {
                expected: self.header.vector_dimension,
                found: entry.dimension(),
                token: term.clone(),
                term,
            });
        }
        self.terms.push(entry);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn finish(self) -> Word2VecModel {
        let mut positions = HashMap::with_capacity(self.terms.len());
        for (idx, entry) in self.terms.iter().enumerate() {
            if positions.contains_key(entry.term()) {
                log::debug!("duplicate term {} at position {idx}", entry.term());
                continue;
            }
            positions.insert(entry.term().clone(), idx);
        }

        Word2VecModel {
            header: self.header,
            encoding: self.encoding,
            terms: self.terms,
            positions,
        }
    }
}

/// A fully loaded word2vec model. Immutable.
#[derive(Debug, Clone)]
pub struct Word2VecModel {
    header: ModelHeader,
    encoding: TermEncoding,
    terms: Vec<TermAndVector>,
    /// First position of every distinct term
    positions: HashMap<Term, usize>,
}

impl Word2VecModel {
    /// Dictionary size declared in the header. May differ from [`len`](Self::len).
    pub fn dictionary_size(&self) -> usize {
        self.header.dictionary_size
    }

    pub fn vector_dimension(&self) -> usize {
        self.header.vector_dimension
    }

    pub fn header(&self) -> ModelHeader {
        self.header
    }

    /// Encoding the terms had in the source file.
    pub fn term_encoding(&self) -> TermEncoding {
        self.encoding
    }

    /// Number of records actually loaded.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Records in file order, duplicates included.
    pub fn iter(&self) -> impl Iterator<Item = &TermAndVector> {
        self.terms.iter()
    }

    pub fn get(&self, index: usize) -> Option<&TermAndVector> {
        self.terms.get(index)
    }

    /// Vector of the first record whose term equals `term` byte for byte.
    pub fn vector(&self, term: impl AsRef<[u8]>) -> Option<&[f32]> {
        self.positions
            .get(term.as_ref())
            .map(|&idx| self.terms[idx].vector())
    }

    pub fn contains(&self, term: impl AsRef<[u8]>) -> bool {
        self.vector(term).is_some()
    }

    pub fn into_terms(self) -> Vec<TermAndVector> {
        self.terms
    }
}
