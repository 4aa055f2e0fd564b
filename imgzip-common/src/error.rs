use thiserror::Error;

/// Why a single image couldn't be retrieved.
///
/// These never end a run: the item is counted as done but not successful and the next one is
/// fetched.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to connect to image URL: {source}")]
    ConnectionFail {
        #[from]
        source: reqwest::Error,
    },

    #[error("Image source returned status {status}")]
    BadStatus { status: u16 },

    #[error("Error while fetching chunk: {message}")]
    ChunkDownloadFail { message: String },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtensionError {
    #[error("Extension {extension} is not an accepted image format")]
    NotAllowed { extension: String },
}
