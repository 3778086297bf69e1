//! Dataset persistence sink.
//!
//! Every analysis may store the raw collections it fetched as JSON documents,
//! keyed by business date, derived user key and a category label. Writes go
//! to distinct paths within one orchestration run, so no locking is needed.
//! Persistence is fire-and-forget: it never blocks or gates the report. The
//! spawned writes are tracked by a `DatasetWriter` so callers can drain them
//! before shutdown instead of losing in-flight writes when the runtime drops.

mod local_fs;

pub use local_fs::LocalFsDatasetSink;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use tokio_util::task::TaskTracker;
use tracing::warn;

use crate::session::{SessionTimestamp, UserContext};

/// Top-level folder for all persisted engagement datasets.
pub const DATASET_NAMESPACE: &str = "spotify";

/// Destination for raw fetched collections.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait DatasetSink: Send + Sync {
    /// Durably store `payload` as `<folder>/<name>.json`.
    async fn write(&self, folder: &str, name: &str, payload: &serde_json::Value) -> Result<()>;
}

/// Sink used when persistence is disabled.
pub struct NoOpDatasetSink;

#[async_trait]
impl DatasetSink for NoOpDatasetSink {
    async fn write(&self, _folder: &str, _name: &str, _payload: &serde_json::Value) -> Result<()> {
        Ok(())
    }
}

/// Folder holding one user's artifacts for one business date.
pub fn session_folder(ctx: &UserContext, ts: &SessionTimestamp) -> String {
    format!(
        "{}/{}/{}",
        DATASET_NAMESPACE, ts.business_date, ctx.derived_user_key
    )
}

/// File name (without extension) for a category within one run.
pub fn session_file_name(ts: &SessionTimestamp, category: &str) -> String {
    format!("{}_{}", ts.session_instant, category)
}

/// Spawns sink writes in the background and tracks them for draining.
///
/// Writes never gate the computation that produced the payload; failures
/// are logged at warn. Without a drain at shutdown, dropping the runtime
/// cancels writes still in flight.
pub struct DatasetWriter {
    sink: Arc<dyn DatasetSink>,
    tracker: TaskTracker,
}

impl DatasetWriter {
    pub fn new(sink: Arc<dyn DatasetSink>) -> Self {
        Self {
            sink,
            tracker: TaskTracker::new(),
        }
    }

    /// Serialize `payload` and hand it to the sink on a background task.
    pub fn persist<T: Serialize>(
        &self,
        ctx: &UserContext,
        ts: &SessionTimestamp,
        category: &str,
        payload: &T,
    ) {
        let payload = match serde_json::to_value(payload) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to serialize {} dataset: {}", category, e);
                return;
            }
        };

        let folder = session_folder(ctx, ts);
        let name = session_file_name(ts, category);
        let category = category.to_string();
        let sink = self.sink.clone();

        self.tracker.spawn(async move {
            if let Err(e) = sink.write(&folder, &name, &payload).await {
                warn!("Failed to persist {} dataset: {:#}", category, e);
            }
        });
    }

    /// Wait until every spawned write has settled.
    ///
    /// The writer stays usable afterwards; further writes are tracked for
    /// the next drain.
    pub async fn drain(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }
}
