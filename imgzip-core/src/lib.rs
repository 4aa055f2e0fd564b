//! Main download and archiving infrastructure for imgzip.
//!
//! The entry point is [`BatchPipeline`](pipeline::BatchPipeline): give it a [`Fetcher`](fetch::Fetcher)
//! to retrieve images with, an [`ArchiveSink`](sink::ArchiveSink) to save the finished zip and
//! optionally a [`Notifier`](notify::Notifier) to report progress to, then hand it a list of
//! descriptors and a group name.
pub use zip;

pub mod archive;
pub mod config;
pub mod error;
pub mod fetch;
pub mod notify;
pub mod pipeline;
pub mod sink;
