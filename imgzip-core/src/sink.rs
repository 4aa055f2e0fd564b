use std::{
    io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use imgzip_common::{
    log::debug,
    tokio::{
        fs::{create_dir_all, File},
        io::AsyncWriteExt,
    },
};

use crate::{archive::ArchiveBlob, error::ArchiveError};

/// Persists a finished archive. Called at most once per run, and only when at least one image
/// made it into the archive.
#[async_trait]
pub trait ArchiveSink: Send + Sync {
    async fn persist(&self, blob: &ArchiveBlob, filename: &str) -> Result<(), ArchiveError>;
}

/// Saves archives as files inside a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ArchiveSink for DirectorySink {
    async fn persist(&self, blob: &ArchiveBlob, filename: &str) -> Result<(), ArchiveError> {
        let persist_fail = |error: io::Error| ArchiveError::PersistFail {
            filename: filename.to_string(),
            message: error.to_string(),
        };

        debug!("Target dir: {}", self.dir.display());
        create_dir_all(&self.dir).await.map_err(persist_fail)?;

        let out_path = self.dir.join(filename);
        debug!("Writing archive to {}", out_path.display());

        let mut file = File::create(&out_path).await.map_err(persist_fail)?;
        file.write_all(blob.as_ref()).await.map_err(persist_fail)?;
        file.flush().await.map_err(persist_fail)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::ArchiveBuilder;
    use imgzip_common::{bytes::Bytes, chrono::NaiveDate};
    use tempdir::TempDir;

    #[tokio::test]
    async fn writes_blob_into_nested_dir() {
        let tmp = TempDir::new("imgzip-sink").unwrap();
        let sink = DirectorySink::new(tmp.path().join("saved").join("zips"));

        let mut builder = ArchiveBuilder::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        builder.add_entry("x.png".into(), Bytes::from_static(b"png"));
        let blob = builder.finalize(6).await.unwrap();

        sink.persist(&blob, "site_images_2024-01-02.zip")
            .await
            .unwrap();

        let written = std::fs::read(sink.dir().join("site_images_2024-01-02.zip")).unwrap();
        assert_eq!(written, blob.bytes().as_ref());
    }

    #[tokio::test]
    async fn write_failure_names_the_archive() {
        let tmp = TempDir::new("imgzip-sink").unwrap();
        let sink = DirectorySink::new(tmp.path());

        let mut builder = ArchiveBuilder::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        builder.add_entry("x.png".into(), Bytes::from_static(b"png"));
        let blob = builder.finalize(6).await.unwrap();

        // The target file name is taken by a directory, so creating the file fails.
        std::fs::create_dir(tmp.path().join("site_images_2024-01-02.zip")).unwrap();

        let error = sink
            .persist(&blob, "site_images_2024-01-02.zip")
            .await
            .unwrap_err();
        assert!(
            matches!(&error, ArchiveError::PersistFail { filename, .. } if filename == "site_images_2024-01-02.zip")
        );
        assert!(error.to_string().contains("site_images_2024-01-02.zip"));
    }
}
