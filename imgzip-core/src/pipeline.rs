//! Provides the batch pipeline turning a list of [`ImageDescriptor`]s into one zip archive.
//!
//! A run walks the descriptors strictly in input order, one retrieval at a time:
//!
//! 1. fetch the image; a failure is counted and the run moves on
//! 2. on success, file the payload under
//!    `{group}/{run date}/{tier}/{name}_{width}x{height}.{extension}`
//! 3. report `{completed, total}` to the [`Notifier`](crate::notify::Notifier)
//! 4. wait a fixed pacing delay before the next item
//!
//! When every item failed the run ends with [`RunError::NoItemsSucceeded`] and nothing is
//! written. Otherwise the archive is finalized and handed to the [`ArchiveSink`] as
//! `{group}_images_{run date}.zip`.
use std::sync::Arc;

use imgzip_common::{
    bytes::Bytes,
    chrono::{NaiveDate, Utc},
    descriptor::ImageDescriptor,
    log::{debug, info, warn},
    tokio::{spawn, task::JoinHandle, time::sleep},
};

use crate::{
    archive::{ArchiveBlob, ArchiveBuilder},
    config::PipelineConfig,
    error::{ArchiveError, RunError},
    fetch::Fetcher,
    notify::{no_op_notifier, RunEvent, SharedNotifier},
    sink::ArchiveSink,
};

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Failed,
}

/// Terminal outcome of one run.
#[derive(Debug)]
pub struct BatchResult {
    /// Either [`RunState::Completed`] or [`RunState::Failed`].
    pub state: RunState,
    /// Items processed, successful or not.
    pub completed_count: usize,
    /// Items that made it into the archive.
    pub success_count: usize,
    pub total_count: usize,
    /// Date every path of this run was filed under.
    pub run_date: NaiveDate,
    /// The archive handed to the sink and its file name, or why there is none.
    pub outcome: Result<(String, ArchiveBlob), RunError>,
}

impl BatchResult {
    pub fn archive(&self) -> Option<&ArchiveBlob> {
        self.outcome.as_ref().ok().map(|(_, blob)| blob)
    }

    pub fn filename(&self) -> Option<&str> {
        self.outcome.as_ref().ok().map(|(name, _)| name.as_str())
    }

    pub fn error(&self) -> Option<&RunError> {
        self.outcome.as_ref().err()
    }
}

/// State and counters scoped to a single run.
#[derive(Debug)]
struct RunRecord {
    state: RunState,
    completed: usize,
    successful: usize,
}

impl RunRecord {
    fn new() -> Self {
        Self {
            state: RunState::Idle,
            completed: 0,
            successful: 0,
        }
    }

    fn transition(&mut self, next: RunState) {
        debug!("Run state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Archive path of one image.
pub fn entry_path(
    group: &str,
    run_date: NaiveDate,
    descriptor: &ImageDescriptor,
    fallback_name: &str,
) -> String {
    format!(
        "{}/{}/{}/{}",
        group,
        run_date.format("%Y-%m-%d"),
        descriptor.tier(),
        descriptor.file_name(fallback_name)
    )
}

/// File name the finished archive is saved under.
pub fn archive_filename(group: &str, run_date: NaiveDate) -> String {
    format!("{}_images_{}.zip", group, run_date.format("%Y-%m-%d"))
}

/// Sequential fetch, classify and archive pipeline.
///
/// Holds no per-run state: every call to [`BatchPipeline::run`] gets its own counters and its
/// own [`ArchiveBuilder`], so one pipeline may serve several independent runs.
pub struct BatchPipeline {
    fetcher: Arc<dyn Fetcher>,
    sink: Arc<dyn ArchiveSink>,
    notifier: SharedNotifier,
    config: PipelineConfig,
}

impl BatchPipeline {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        sink: Arc<dyn ArchiveSink>,
        notifier: Option<SharedNotifier>,
        config: PipelineConfig,
    ) -> Self {
        let notifier = notifier.unwrap_or_else(no_op_notifier);
        Self {
            fetcher,
            sink,
            notifier,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs over `descriptors`, filing everything under `group` and today's UTC date.
    pub async fn run(&self, descriptors: &[ImageDescriptor], group: &str) -> BatchResult {
        self.run_at(descriptors, group, Utc::now().date_naive()).await
    }

    /// Same as [`BatchPipeline::run`] with an explicit run date.
    pub async fn run_at(
        &self,
        descriptors: &[ImageDescriptor],
        group: &str,
        run_date: NaiveDate,
    ) -> BatchResult {
        let total = descriptors.len();
        info!("Starting run for {} with {} images", group, total);

        let mut record = RunRecord::new();
        let mut builder = ArchiveBuilder::new(run_date);
        record.transition(RunState::Running);

        for (position, descriptor) in descriptors.iter().enumerate() {
            if let Some(payload) = self.fetch_one(descriptor).await {
                let path = entry_path(group, run_date, descriptor, &self.config.fallback_name);
                debug!("Adding {} as {}", descriptor.url, path);
                builder.add_entry(path, payload);
                record.successful += 1;
            }
            record.completed += 1;

            self.emit(RunEvent::DownloadProgress {
                completed: record.completed,
                total,
            });

            if position + 1 < total && !self.config.pacing_delay().is_zero() {
                sleep(self.config.pacing_delay()).await;
            }
        }

        let outcome = if record.successful == 0 {
            // Partial archive is dropped without ever being finalized.
            drop(builder);
            Err(RunError::NoItemsSucceeded { total })
        } else {
            self.finish(builder, group, run_date)
                .await
                .map_err(RunError::from)
        };

        match &outcome {
            Ok(_) => {
                record.transition(RunState::Completed);
                info!(
                    "Run for {} finished: {} of {} images archived",
                    group, record.successful, total
                );
                self.emit(RunEvent::DownloadComplete {
                    successful: record.successful,
                    total,
                });
            }
            Err(error) => {
                record.transition(RunState::Failed);
                warn!("Run for {} failed: {}", group, error);
                self.emit(RunEvent::DownloadError {
                    error: error.to_string(),
                });
            }
        }

        BatchResult {
            state: record.state,
            completed_count: record.completed,
            success_count: record.successful,
            total_count: total,
            run_date,
            outcome,
        }
    }

    /// Spawns the run on the tokio runtime.
    ///
    /// # Returns
    /// A `JoinHandle` resolving to the [`BatchResult`] of the run.
    pub fn spawn(
        self: Arc<Self>,
        descriptors: Vec<ImageDescriptor>,
        group: String,
    ) -> JoinHandle<BatchResult> {
        spawn(async move {
            debug!("Run task for {} initialized", group);
            self.run(&descriptors, &group).await
        })
    }

    async fn fetch_one(&self, descriptor: &ImageDescriptor) -> Option<Bytes> {
        match self.fetcher.fetch(&descriptor.url).await {
            Ok(payload) => Some(payload),
            Err(error) => {
                warn!("Failed to fetch {}: {}", descriptor.url, error);
                None
            }
        }
    }

    async fn finish(
        &self,
        builder: ArchiveBuilder,
        group: &str,
        run_date: NaiveDate,
    ) -> Result<(String, ArchiveBlob), ArchiveError> {
        let blob = builder.finalize(self.config.compression_level).await?;
        let filename = archive_filename(group, run_date);

        self.sink.persist(&blob, &filename).await?;
        debug!("Archive {} handed to sink", filename);

        Ok((filename, blob))
    }

    fn emit(&self, event: RunEvent) {
        if let Err(error) = self.notifier.notify(event) {
            warn!("Could not notify observer: {}", error);
        }
    }
}
