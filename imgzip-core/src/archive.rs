//! In-memory zip archive built up during a run.
//!
//! The [`ArchiveBuilder`] is owned by exactly one run. Payloads are added as they are fetched and
//! only compressed when the run calls [`ArchiveBuilder::finalize`], which consumes the builder.
use std::io::{Cursor, Write};

use ahash::AHashMap;
use imgzip_common::{
    bytes::Bytes,
    chrono::{Datelike, NaiveDate},
    log::debug,
    tokio::task::spawn_blocking,
};
use zip::{write::SimpleFileOptions, CompressionMethod, DateTime, ZipWriter};

use crate::error::ArchiveError;

/// A finished zip archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveBlob {
    bytes: Bytes,
}

impl ArchiveBlob {
    #[inline]
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

impl AsRef<[u8]> for ArchiveBlob {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Accumulates `(path, payload)` entries for one archive.
///
/// Entries keep the order they were first added in. Adding a path that is already present
/// replaces its payload in place: the archive never holds the same path twice and the last
/// write wins.
#[derive(Debug)]
pub struct ArchiveBuilder {
    entries: Vec<(String, Bytes)>,
    index: AHashMap<String, usize>,
    timestamp: DateTime,
}

impl ArchiveBuilder {
    /// Creates an empty builder whose entries will be stamped with midnight of `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            entries: Vec::new(),
            index: AHashMap::new(),
            timestamp: entry_timestamp(date),
        }
    }

    pub fn add_entry(&mut self, path: String, payload: Bytes) {
        if let Some(&slot) = self.index.get(&path) {
            debug!("Path {} already in archive, replacing previous payload", path);
            self.entries[slot].1 = payload;
            return;
        }

        self.index.insert(path.clone(), self.entries.len());
        self.entries.push((path, payload));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    /// Paths in the order they will be written.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(path, _)| path.as_str())
    }

    /// Compresses every entry with Deflate at `compression_level` into a single zip.
    ///
    /// Runs on a blocking thread since compression is CPU bound.
    pub async fn finalize(self, compression_level: u8) -> Result<ArchiveBlob, ArchiveError> {
        spawn_blocking(move || self.write_zip(compression_level)).await?
    }

    fn write_zip(self, compression_level: u8) -> Result<ArchiveBlob, ArchiveError> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(i64::from(compression_level)))
            .last_modified_time(self.timestamp);

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        for (path, payload) in &self.entries {
            debug!("Writing {} to archive", path);
            zip.start_file(path.as_str(), options)?;
            zip.write_all(payload)?;
        }

        let cursor = zip.finish()?;
        let bytes = Bytes::from(cursor.into_inner());
        debug!(
            "Archive finalized with {} entries, {} bytes",
            self.entries.len(),
            bytes.len()
        );

        Ok(ArchiveBlob { bytes })
    }
}

/// Zip timestamps start in 1980; anything outside the format's range gets its default.
fn entry_timestamp(date: NaiveDate) -> DateTime {
    let (Ok(year), Ok(month), Ok(day)) = (
        u16::try_from(date.year()),
        u8::try_from(date.month()),
        u8::try_from(date.day()),
    ) else {
        return DateTime::default();
    };

    DateTime::from_date_and_time(year, month, day, 0, 0, 0).unwrap_or_default()
}
