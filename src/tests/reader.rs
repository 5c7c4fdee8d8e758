//! End-to-end reads of model archives.

use std::cell::Cell;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::rc::Rc;

use tempfile::TempDir;

use super::{dl4j_archive, zip_with_entries};
use crate::word2vec::{load_model, Dl4jModelReader, ModelError, TermEncoding, Word2VecModel};

fn read(bytes: Vec<u8>) -> Result<Word2VecModel, ModelError> {
    Dl4jModelReader::new(Cursor::new(bytes)).read()
}

/// Stream that records when it is dropped.
struct TrackedStream {
    inner: Cursor<Vec<u8>>,
    dropped: Rc<Cell<bool>>,
}

impl Read for TrackedStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Seek for TrackedStream {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.inner.seek(pos)
    }
}

impl Drop for TrackedStream {
    fn drop(&mut self) {
        self.dropped.set(true);
    }
}

fn tracked(bytes: Vec<u8>) -> (TrackedStream, Rc<Cell<bool>>) {
    let dropped = Rc::new(Cell::new(false));
    let stream = TrackedStream {
        inner: Cursor::new(bytes),
        dropped: dropped.clone(),
    };
    (stream, dropped)
}

#[test]
fn test_plain_model() {
    let model = read(dl4j_archive("3 2\ncat 0.1 0.2\ndog 0.3 0.4\nfish 0.5 0.6\n")).unwrap();

    assert_eq!(model.dictionary_size(), 3);
    assert_eq!(model.vector_dimension(), 2);
    assert_eq!(model.len(), 3);
    assert_eq!(model.term_encoding(), TermEncoding::Plain);

    let expected: [(&str, [f32; 2]); 3] =
        [("cat", [0.1, 0.2]), ("dog", [0.3, 0.4]), ("fish", [0.5, 0.6])];
    for (entry, (term, vector)) in model.iter().zip(expected.iter()) {
        assert_eq!(entry.term().as_bytes(), term.as_bytes());
        assert_eq!(entry.vector(), vector);
    }
}

#[test]
fn test_every_vector_has_declared_dimension() {
    let model = read(dl4j_archive("4 3\na 1 2 3\nb 4 5 6\n\nc 7 8 9\nd 0 0 0\n")).unwrap();

    // four non-empty record lines
    assert!(model.len() <= 4);
    assert!(model.iter().all(|entry| entry.dimension() == 3));
}

#[test]
fn test_dimension_mismatch_fails_whole_read() {
    let err = read(dl4j_archive("2 2\ncat 1.0 2.0 3.0\ndog 0.3 0.4\n")).unwrap_err();

    match err {
        ModelError::DimensionMismatch {
            expected,
            found,
            token,
            ..
        } => {
            assert_eq!(expected, 2);
            assert_eq!(found, 3);
            assert_eq!(token, "cat");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_late_dimension_mismatch() {
    let err = read(dl4j_archive("3 2\ncat 0.1 0.2\ndog 0.3\nfish 0.5 0.6\n")).unwrap_err();
    assert!(matches!(
        err,
        ModelError::DimensionMismatch { found: 1, .. }
    ));
}

#[test]
fn test_base64_terms() {
    let model = read(dl4j_archive("2 2\nb64:Y2F0 0.1 0.2\nb64:ZG9n 0.3 0.4\n")).unwrap();

    assert_eq!(model.term_encoding(), TermEncoding::Base64);
    assert_eq!(model.get(0).unwrap().term().as_bytes(), b"cat");
    assert_eq!(model.get(1).unwrap().term().as_bytes(), b"dog");
    assert_eq!(model.vector("dog"), Some(&[0.3f32, 0.4f32][..]));
}

#[test]
fn test_base64_terms_need_not_be_utf8() {
    // "/w==" is the single byte 0xff
    let model = read(dl4j_archive("1 1\nB64:/w== 1.0\n")).unwrap();
    assert_eq!(model.get(0).unwrap().term().as_bytes(), &[0xff]);
    assert!(model.contains([0xffu8]));
}

#[test]
fn test_base64_mode_is_sticky() {
    // second term lacks the marker: it is still decoded as base64 and fails
    let err = read(dl4j_archive("2 2\nb64:Y2F0 0.1 0.2\ndog 0.3 0.4\n")).unwrap_err();
    match err {
        ModelError::InvalidTerm {
            line_number, token, ..
        } => {
            assert_eq!(line_number, 3);
            assert_eq!(token, "dog");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_plain_mode_is_sticky() {
    // first term has no marker, later marker-looking terms stay literal
    let model = read(dl4j_archive("2 1\ncat 0.1\nb64:ZG9n 0.3\n")).unwrap();
    assert_eq!(model.term_encoding(), TermEncoding::Plain);
    assert!(model.contains("b64:ZG9n"));
}

#[test]
fn test_short_first_term_is_plain() {
    let model = read(dl4j_archive("2 1\nab 0.5\nb64:x 0.6\n")).unwrap();
    assert_eq!(model.term_encoding(), TermEncoding::Plain);
    assert!(model.contains("ab"));
}

#[test]
fn test_duplicate_terms_are_kept() {
    let model = read(dl4j_archive("2 1\ncat 0.1\ncat 0.2\n")).unwrap();
    assert_eq!(model.len(), 2);
    assert_eq!(model.vector("cat"), Some(&[0.1f32][..]));
}

#[test]
fn test_declared_size_is_only_a_hint() {
    let model = read(dl4j_archive("10 1\ncat 0.1\n")).unwrap();
    assert_eq!(model.dictionary_size(), 10);
    assert_eq!(model.len(), 1);
}

#[test]
fn test_oversized_declared_dimension() {
    for header in ["1 18446744073709551615", "1 1000000000000"] {
        let err = read(dl4j_archive(&format!("{header}\ncat 0.1\n"))).unwrap_err();
        match err {
            ModelError::DimensionMismatch { found, token, .. } => {
                assert_eq!(found, 1);
                assert_eq!(token, "cat");
            }
            other => panic!("unexpected error for {header:?}: {other:?}"),
        }
    }
}

#[test]
fn test_oversized_declared_size() {
    for header in ["18446744073709551615 1", "1000000000000 1"] {
        let model = read(dl4j_archive(&format!("{header}\ncat 0.1\n"))).unwrap();
        assert_eq!(model.len(), 1);
        assert_eq!(model.vector("cat"), Some(&[0.1f32][..]));
    }
}

#[test]
fn test_missing_syn0_entry() {
    let bytes = zip_with_entries(&[("config.json", "{}"), ("syn1.txt", "3 2\n")]);

    let err = read(bytes).unwrap_err();
    assert!(matches!(err, ModelError::MissingModelFile { prefix: "syn0" }));
    assert!(err.to_string().contains("mandatory file"));
}

#[test]
fn test_malformed_header() {
    let err = read(dl4j_archive("3\ncat 0.1 0.2\n")).unwrap_err();
    match err {
        ModelError::MalformedHeader { line, .. } => assert_eq!(line, "3"),
        other => panic!("unexpected error: {other:?}"),
    }

    let err = read(dl4j_archive("three 2\n")).unwrap_err();
    assert!(matches!(err, ModelError::MalformedHeader { .. }));
}

#[test]
fn test_malformed_number() {
    let err = read(dl4j_archive("1 2\ncat 0.1 zero\n")).unwrap_err();
    match err {
        ModelError::MalformedNumber {
            line_number, token, ..
        } => {
            assert_eq!(line_number, 2);
            assert_eq!(token, "zero");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_invalid_utf8_in_entry() {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("syn0.txt", zip::write::SimpleFileOptions::default())
        .unwrap();
    std::io::Write::write_all(&mut writer, b"1 1\n\xff\xfe 0.1\n").unwrap();
    let bytes = writer.finish().unwrap().into_inner();

    assert!(matches!(read(bytes), Err(ModelError::Io(_))));
}

#[test]
fn test_truncated_archive() {
    let mut bytes = dl4j_archive("3 2\ncat 0.1 0.2\ndog 0.3 0.4\nfish 0.5 0.6\n");
    bytes.truncate(40);

    let err = read(bytes).unwrap_err();
    assert!(matches!(err, ModelError::Io(_) | ModelError::Archive(_)));
}

#[test]
fn test_stream_released_on_success() {
    let (stream, dropped) = tracked(dl4j_archive("1 1\ncat 0.1\n"));

    let model = Dl4jModelReader::new(stream).read().unwrap();
    assert_eq!(model.len(), 1);
    assert!(dropped.get());
}

#[test]
fn test_stream_released_on_failure() {
    let (stream, dropped) = tracked(dl4j_archive("1 2\ncat 0.1\n"));

    assert!(Dl4jModelReader::new(stream).read().is_err());
    assert!(dropped.get());
}

#[test]
fn test_stream_released_when_never_read() {
    let (stream, dropped) = tracked(dl4j_archive("1 1\ncat 0.1\n"));

    drop(Dl4jModelReader::new(stream));
    assert!(dropped.get());
}

#[test]
fn test_buffered_non_seekable_stream() {
    let bytes = dl4j_archive("2 2\nb64:Y2F0 0.1 0.2\nb64:ZG9n 0.3 0.4\n");
    // a plain slice reader stands in for a pipe
    let reader = Dl4jModelReader::buffered(&bytes[..]).unwrap();

    let model = reader.read().unwrap();
    assert_eq!(model.len(), 2);
    assert!(model.contains("dog"));
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("model.zip");
    std::fs::write(&path, dl4j_archive("2 3\nrust 1 2 3\ncrab 4 5 6\n")).unwrap();

    let model = load_model(&path).unwrap();
    assert_eq!(model.vector("crab"), Some(&[4.0f32, 5.0, 6.0][..]));
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = load_model(dir.path().join("nope.zip")).unwrap_err();
    assert!(matches!(err, ModelError::Io(_)));
}
