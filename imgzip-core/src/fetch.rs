//! Retrieval of a single image.
//!
//! The pipeline only knows the [`Fetcher`] trait; [`HttpFetcher`] is the implementation backed by
//! `reqwest` that hosts normally use. Timeouts are left to the HTTP client itself.
use async_trait::async_trait;
use futures::StreamExt;
use imgzip_common::{
    bytes::Bytes,
    error::FetchError,
    log::debug,
    reqwest::{Client, ClientBuilder},
};

use crate::config::PipelineConfig;

/// Upper bound for the buffer reserved up front from a declared `Content-Length`.
const PREALLOC_LIMIT: u64 = 8 * 1024 * 1024;

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Retrieves the whole body found at `url`.
    ///
    /// Any non-success response or transport failure is an `Err`.
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError>;
}

/// [`Fetcher`] doing plain HTTP GET requests.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a client with the user agent and timeout of `config`.
    pub fn new(config: &PipelineConfig) -> Result<Self, FetchError> {
        let mut builder = ClientBuilder::new().user_agent(config.user_agent.as_str());

        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Uses an already configured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        debug!("Fetching {}", url);
        let res = self.client.get(url).send().await?;

        if !res.status().is_success() {
            debug!(
                "Image source for {} returned status {}. Skipping download.",
                url,
                res.status().as_str()
            );
            return Err(FetchError::BadStatus {
                status: res.status().as_u16(),
            });
        }

        // Declared length is untrusted; larger bodies grow the buffer as chunks arrive.
        let size = res.content_length().unwrap_or_default().min(PREALLOC_LIMIT);
        let mut fvec: Vec<u8> = Vec::with_capacity(size.try_into().unwrap_or(0));

        debug!("Retrieving chunks for {}", url);
        let mut stream = res.bytes_stream();

        while let Some(item) = stream.next().await {
            let chunk = match item {
                Ok(chunk) => chunk,
                Err(e) => {
                    return Err(FetchError::ChunkDownloadFail {
                        message: e.to_string(),
                    });
                }
            };
            fvec.extend_from_slice(&chunk);
        }

        debug!("Fetched {} bytes from {}", fvec.len(), url);
        Ok(Bytes::from(fvec))
    }
}
