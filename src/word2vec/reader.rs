use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read, Seek};
use std::path::Path;

use super::record::{decode_record, split_tokens};
use super::{
    archive, ModelError, ModelHeader, TermEncoding, Word2VecModel, Word2VecModelBuilder,
    MODEL_FILE_NAME_PREFIX,
};

/// Reads the zip produced by Deeplearning4j's `WordVectorSerializer` into a
/// [`Word2VecModel`].
///
/// The reader owns the stream. [`read`](Self::read) consumes the reader, so the
/// stream is dropped on every exit path, successful or not.
pub struct Dl4jModelReader<R: Read + Seek> {
    stream: BufReader<R>,
}

impl Dl4jModelReader<File> {
    /// Open a model archive on disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(file))
    }
}

impl Dl4jModelReader<Cursor<Vec<u8>>> {
    /// Buffer a non-seekable stream (pipe, socket) in memory.
    ///
    /// The zip central directory sits at the end of the archive, so the
    /// whole stream has to be available before any entry can be located.
    pub fn buffered(mut stream: impl Read) -> Result<Self, ModelError> {
        let mut bytes = Vec::new();
        stream.read_to_end(&mut bytes)?;
        Ok(Self::new(Cursor::new(bytes)))
    }
}

impl<R: Read + Seek> Dl4jModelReader<R> {
    pub fn new(stream: R) -> Self {
        Self {
            stream: BufReader::new(stream),
        }
    }

    /// Load the model. On error nothing of the partially read model survives.
    pub fn read(self) -> Result<Word2VecModel, ModelError> {
        archive::with_entry(self.stream, MODEL_FILE_NAME_PREFIX, read_model_entry)
    }
}

/// Parse the decompressed content of a `syn0` entry.
pub fn read_model_entry(entry: &mut dyn Read) -> Result<Word2VecModel, ModelError> {
    let mut lines = BufReader::new(entry).lines();

    let header_line = lines
        .next()
        .transpose()?
        .ok_or_else(|| ModelError::malformed_header("", "model file is empty"))?;
    let header = ModelHeader::parse(&header_line)?;
    log::debug!(
        "model header: dictionary_size={} vector_dimension={}",
        header.dictionary_size,
        header.vector_dimension
    );

    let mut builder = Word2VecModelBuilder::new(header);
    let mut encoding: Option<TermEncoding> = None;

    for (idx, line) in lines.enumerate() {
        let line = line?;
        // header is line 1
        let line_number = idx + 2;
        if line.is_empty() {
            continue;
        }

        let encoding = *encoding.get_or_insert_with(|| {
            let detected = TermEncoding::detect(split_tokens(&line).next().unwrap_or_default());
            log::debug!("term encoding: {detected:?}");
            detected
        });

        let entry = decode_record(&line, line_number, header.vector_dimension, encoding)?;
        builder.add_term_and_vector(entry)?;
    }

    builder.set_encoding(encoding.unwrap_or_default());

    if builder.len() != header.dictionary_size {
        log::warn!(
            "model declares {} terms but {} were read",
            header.dictionary_size,
            builder.len()
        );
    }
    log::info!(
        "loaded word2vec model: {} terms, {} dimensions",
        builder.len(),
        header.vector_dimension
    );

    Ok(builder.finish())
}

/// Load a model archive from `path`.
pub fn load_model(path: impl AsRef<Path>) -> Result<Word2VecModel, ModelError> {
    Dl4jModelReader::open(path)?.read()
}
