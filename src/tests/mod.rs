mod reader;

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Build an in-memory zip archive with deflated text entries, in order.
pub(crate) fn zip_with_entries(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, content) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }

    writer.finish().unwrap().into_inner()
}

/// A DL4J-style archive: some bookkeeping entries around the `syn0` model.
pub(crate) fn dl4j_archive(syn0: &str) -> Vec<u8> {
    zip_with_entries(&[
        ("config.json", r#"{"layerSize":2}"#),
        ("syn0.txt", syn0),
        ("syn1.txt", "not a model"),
        ("codes.txt", "0 1\n"),
    ])
}
