//! Per-document float values backed by numeric doc values.
//!
//! Values are stored as 32-bit float bit patterns inside 64-bit numeric doc
//! values and read back through a forward-only cursor. Documents must be
//! visited in non-decreasing id order.

use std::fmt;

/// Document identifier within one index segment.
pub type DocId = i32;

/// Cursor position once every document has been visited.
pub const NO_MORE_DOCS: DocId = i32::MAX;

/// Errors raised while reading per-document values.
#[derive(Debug, thiserror::Error)]
pub enum DocValuesError {
    #[error("docs were sent out-of-order: lastDocID={last} vs docID={doc}")]
    OutOfOrder { last: DocId, doc: DocId },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Forward-only iterator over documents that have a numeric value.
pub trait NumericDocValues {
    /// Current document, `-1` before the first advance, [`NO_MORE_DOCS`] when
    /// exhausted.
    fn doc_id(&self) -> DocId;

    /// Move to the first document `>= target` and return it.
    fn advance(&mut self, target: DocId) -> std::io::Result<DocId>;

    /// Value of the current document.
    fn long_value(&self) -> std::io::Result<i64>;
}

/// In-memory [`NumericDocValues`] over a sparse set of documents.
#[derive(Debug, Clone, Default)]
pub struct SparseNumericDocValues {
    docs: Vec<(DocId, i64)>,
    /// Index into `docs` of the current document; `None` before the first advance
    pos: Option<usize>,
}

impl SparseNumericDocValues {
    /// Build from `(doc, value)` pairs. Later pairs win for repeated docs.
    pub fn new(values: impl IntoIterator<Item = (DocId, i64)>) -> Self {
        let mut docs: Vec<(DocId, i64)> = values.into_iter().collect();
        docs.sort_by_key(|(doc, _)| *doc);
        docs.reverse();
        docs.dedup_by_key(|(doc, _)| *doc);
        docs.reverse();
        Self { docs, pos: None }
    }

    /// Build from float values, stored as their raw bit patterns.
    pub fn from_floats(values: impl IntoIterator<Item = (DocId, f32)>) -> Self {
        Self::new(
            values
                .into_iter()
                .map(|(doc, value)| (doc, i64::from(value.to_bits() as i32))),
        )
    }
}

impl NumericDocValues for SparseNumericDocValues {
    fn doc_id(&self) -> DocId {
        match self.pos {
            None => -1,
            Some(pos) => self.docs.get(pos).map_or(NO_MORE_DOCS, |(doc, _)| *doc),
        }
    }

    fn advance(&mut self, target: DocId) -> std::io::Result<DocId> {
        let start = self.pos.unwrap_or(0);
        let offset = self.docs[start.min(self.docs.len())..]
            .partition_point(|(doc, _)| *doc < target);
        self.pos = Some(start + offset);
        Ok(self.doc_id())
    }

    fn long_value(&self) -> std::io::Result<i64> {
        self.pos
            .and_then(|pos| self.docs.get(pos))
            .map(|(_, value)| *value)
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "cursor is not positioned on a document",
                )
            })
    }
}

/// Sort type of a [`SortField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortType {
    Float,
}

/// Sort description handed to the scoring/sorting framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    pub field: String,
    pub kind: SortType,
    pub reverse: bool,
}

/// Exposes the float values of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FloatFieldSource {
    field: String,
}

impl FloatFieldSource {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn description(&self) -> String {
        format!("float({})", self.field)
    }

    pub fn sort_field(&self, reverse: bool) -> SortField {
        SortField {
            field: self.field.clone(),
            kind: SortType::Float,
            reverse,
        }
    }

    /// Per-document accessor over `doc_values`, which must belong to this field.
    pub fn values<D: NumericDocValues>(&self, doc_values: D) -> FloatDocValues<D> {
        FloatDocValues {
            description: self.description(),
            doc_values,
            last_doc_id: 0,
        }
    }
}

impl fmt::Display for FloatFieldSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

/// Float view of one field's numeric doc values.
#[derive(Debug)]
pub struct FloatDocValues<D> {
    description: String,
    doc_values: D,
    last_doc_id: DocId,
}

impl<D: NumericDocValues> FloatDocValues<D> {
    /// Whether `doc` has a stored value.
    ///
    /// Calls must use non-decreasing doc ids.
    pub fn exists(&mut self, doc: DocId) -> Result<bool, DocValuesError> {
        if doc < self.last_doc_id {
            return Err(DocValuesError::OutOfOrder {
                last: self.last_doc_id,
                doc,
            });
        }
        self.last_doc_id = doc;

        let mut current = self.doc_values.doc_id();
        if doc > current {
            current = self.doc_values.advance(doc)?;
        }
        Ok(doc == current)
    }

    /// Stored value of `doc`, or `0.0` when it has none.
    pub fn float_val(&mut self, doc: DocId) -> Result<f32, DocValuesError> {
        if self.exists(doc)? {
            let bits = self.doc_values.long_value()? as i32;
            Ok(f32::from_bits(bits as u32))
        } else {
            Ok(0.0)
        }
    }

    pub fn int_val(&mut self, doc: DocId) -> Result<i32, DocValuesError> {
        Ok(self.float_val(doc)? as i32)
    }

    pub fn long_val(&mut self, doc: DocId) -> Result<i64, DocValuesError> {
        Ok(self.float_val(doc)? as i64)
    }

    pub fn double_val(&mut self, doc: DocId) -> Result<f64, DocValuesError> {
        Ok(f64::from(self.float_val(doc)?))
    }

    /// Integral values keep their fraction digit (`0.0`, `3.0`).
    pub fn str_val(&mut self, doc: DocId) -> Result<String, DocValuesError> {
        Ok(format!("{:?}", self.float_val(doc)?))
    }

    /// `"float(<field>)=<value>"`
    pub fn describe(&mut self, doc: DocId) -> Result<String, DocValuesError> {
        let value = self.str_val(doc)?;
        Ok(format!("{}={}", self.description, value))
    }
}
