//! # imgzip
//!
//! imgzip fetches the images found on a web page and packs them into a single zip archive,
//! sorted as `{site}/{date}/{size tier}/{name}_{width}x{height}.{ext}`.
//!
//! Discovering the images is left to the host: it hands over a list of
//! [`ImageDescriptor`]s and a group name (usually the site's hostname, see
//! [`group_from_page_url`]). Images are fetched one after the other, failures are counted and
//! skipped, and progress is reported through a [`Notifier`].
//!
//! ```no_run
//! use imgzip::*;
//! use std::sync::Arc;
//!
//! async fn archive_page(images: Vec<ImageDescriptor>) {
//!     let config = PipelineConfig::default();
//!     let fetcher = Arc::new(HttpFetcher::new(&config).unwrap());
//!     let sink = Arc::new(DirectorySink::new("./downloads"));
//!     let (notifier, mut events) = ChannelNotifier::channel();
//!
//!     let notifier: Arc<dyn Notifier> = Arc::new(notifier);
//!     let pipeline = BatchPipeline::new(fetcher, sink, Some(notifier), config);
//!     let group = group_from_page_url("https://www.example.com/gallery").unwrap();
//!
//!     let result = pipeline.run(&images, &group).await;
//!     while let Ok(event) = events.try_recv() {
//!         println!("{:?}", event);
//!     }
//!     println!("{} of {} images archived", result.success_count, result.total_count);
//! }
//! ```

// Export the data model
pub use imgzip_common::descriptor::{ImageDescriptor, TierSummary};
pub use imgzip_common::extension::Extension;
pub use imgzip_common::group_from_page_url;
pub use imgzip_common::sanitize::sanitize_name;
pub use imgzip_common::tier::{classify_size, SizeTier};

// Export the pipeline and its collaborators
pub use imgzip_core::archive::{ArchiveBlob, ArchiveBuilder};
pub use imgzip_core::config::PipelineConfig;
pub use imgzip_core::error::{ArchiveError, RunError};
pub use imgzip_core::fetch::{Fetcher, HttpFetcher};
pub use imgzip_core::notify::{ChannelNotifier, NoOpNotifier, Notifier, RunEvent};
pub use imgzip_core::pipeline::{BatchPipeline, BatchResult, RunState};
pub use imgzip_core::sink::{ArchiveSink, DirectorySink};

pub use imgzip_common;
pub use imgzip_core;
