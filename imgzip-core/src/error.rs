use std::io;

use imgzip_common::tokio::task::JoinError;
use thiserror::Error;

/// Failures while building or persisting the archive of a run.
#[allow(clippy::enum_variant_names)]
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Error while writing zip archive: {source}")]
    ZipIOError {
        #[from]
        source: zip::result::ZipError,
    },

    #[error("Failed to access file: {source}")]
    IOError {
        #[from]
        source: io::Error,
    },

    #[error("Failed to start thread for compressing the archive: {source}")]
    ZipThreadStartError {
        #[from]
        source: JoinError,
    },

    #[error("Failed to save archive {filename}: {message}")]
    PersistFail { filename: String, message: String },
}

/// Terminal outcome of a failed run.
///
/// The `Display` text is what gets sent to the observer in the error event.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("No images could be downloaded ({total} attempted)")]
    NoItemsSucceeded { total: usize },

    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

/// The observer of a run couldn't be reached.
///
/// Never affects the run; the pipeline logs it and moves on.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum NotifyError {
    #[error("Observer is no longer listening for run events")]
    ObserverGone,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse pipeline config: {source}")]
    Parse {
        #[from]
        source: toml::de::Error,
    },

    #[error("Compression level {level} is out of range (0-9)")]
    InvalidCompressionLevel { level: u8 },
}
