//! Locating the model entry inside a zip archive.

use std::io::{Read, Seek};

use zip::ZipArchive;

use super::ModelError;

/// Walk the archive entries in archive order and hand the first one whose
/// name starts with `prefix` to `f`.
///
/// Entries are opened one at a time; nothing before the match is
/// decompressed and nothing after it is looked at.
pub fn with_entry<R, T, F>(stream: R, prefix: &str, f: F) -> Result<T, ModelError>
where
    R: Read + Seek,
    F: FnOnce(&mut dyn Read) -> Result<T, ModelError>,
{
    let mut archive = ZipArchive::new(stream)?;

    for idx in 0..archive.len() {
        let mut entry = archive.by_index(idx)?;
        if entry.name().starts_with(prefix) {
            log::debug!(
                "found model entry {} ({} bytes uncompressed)",
                entry.name(),
                entry.size()
            );
            return f(&mut entry);
        }
        log::debug!("skipping archive entry {}", entry.name());
    }

    Err(ModelError::missing_model_file())
}
