use std::fmt::Debug;
use std::sync::Arc;

use imgzip_common::serde::{self, Deserialize, Serialize};
use imgzip_common::tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::error::NotifyError;

/// Message sent from a run to whoever is watching it.
///
/// Serializes to the JSON shapes the UI expects, tagged by `action`:
///
/// ```
/// # use imgzip_core::notify::RunEvent;
/// let event = RunEvent::DownloadProgress { completed: 1, total: 2 };
/// assert_eq!(
///     imgzip_common::serde_json::to_string(&event).unwrap(),
///     r#"{"action":"downloadProgress","completed":1,"total":2}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(crate = "self::serde", tag = "action", rename_all = "camelCase")]
pub enum RunEvent {
    /// One more item was processed, successfully or not.
    DownloadProgress { completed: usize, total: usize },
    /// The archive was handed to the sink.
    DownloadComplete { successful: usize, total: usize },
    /// The run ended without an archive.
    DownloadError { error: String },
}

/// One-way sink for [`RunEvent`]s.
///
/// Delivery is fire-and-forget: an error returned here is logged by the pipeline and otherwise
/// ignored.
pub trait Notifier: Send + Sync + Debug {
    fn notify(&self, event: RunEvent) -> Result<(), NotifyError>;
}

/// Convenience type alias for a shared, thread-safe notifier.
pub type SharedNotifier = Arc<dyn Notifier>;

/// A no-operation implementation of [`Notifier`].
/// Used as a default when nobody is watching the run.
#[derive(Debug, Clone)]
pub struct NoOpNotifier;

impl Notifier for NoOpNotifier {
    fn notify(&self, _event: RunEvent) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Returns a shared instance of a [`NoOpNotifier`].
pub fn no_op_notifier() -> SharedNotifier {
    Arc::new(NoOpNotifier)
}

/// Forwards events into a tokio channel, typically drained by a UI task.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: UnboundedSender<RunEvent>,
}

impl ChannelNotifier {
    /// Creates the notifier along with the receiving end of its channel.
    pub fn channel() -> (Self, UnboundedReceiver<RunEvent>) {
        let (sender, receiver) = unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn from_sender(sender: UnboundedSender<RunEvent>) -> Self {
        Self { sender }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, event: RunEvent) -> Result<(), NotifyError> {
        self.sender
            .send(event)
            .map_err(|_closed| NotifyError::ObserverGone)
    }
}
