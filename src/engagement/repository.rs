//! Engagement orchestrator.

use std::sync::Arc;

use tracing::info;

use super::breadth::analyze_breadth;
use super::depth::analyze_depth;
use super::following::analyze_following;
use super::models::EngagementReport;
use super::EngagementError;
use crate::dataset::{DatasetSink, DatasetWriter};
use crate::session::{SessionTimestamp, UserContext};
use crate::spotify::MusicApi;

/// Aggregates a user's listening behavior into one engagement report.
pub struct EngagementRepository {
    api: Arc<dyn MusicApi>,
    writer: DatasetWriter,
}

impl EngagementRepository {
    pub fn new(api: Arc<dyn MusicApi>, sink: Arc<dyn DatasetSink>) -> Self {
        Self {
            api,
            writer: DatasetWriter::new(sink),
        }
    }

    /// Run the breadth, depth and following analyses concurrently and merge
    /// their outputs.
    ///
    /// Resolves exactly once per call with either the full report or a
    /// propagated failure; no partial report is ever returned. Dataset writes
    /// spawned along the way may still be in flight when this returns; call
    /// [`drain_dataset_writes`](Self::drain_dataset_writes) to wait for them.
    pub async fn get_user_music_engagement(
        &self,
        ctx: &UserContext,
    ) -> Result<EngagementReport, EngagementError> {
        let ts = SessionTimestamp::now();

        info!(
            user_key = %ctx.derived_user_key,
            business_date = %ts.business_date,
            "Starting engagement aggregation"
        );

        // Join, not race: all three must complete, any failure aborts.
        let (breadth, depth, following) = tokio::try_join!(
            analyze_breadth(self.api.as_ref(), &self.writer, ctx, &ts),
            analyze_depth(self.api.as_ref(), &self.writer, ctx, &ts),
            analyze_following(self.api.as_ref(), &self.writer, ctx, &ts),
        )?;

        info!(user_key = %ctx.derived_user_key, "Engagement aggregation complete");

        Ok(EngagementReport::assemble(breadth, depth, following))
    }

    /// Wait for every background dataset write spawned so far to settle.
    pub async fn drain_dataset_writes(&self) {
        self.writer.drain().await;
    }
}
