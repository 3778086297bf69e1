//! Artist-genre resolution.
//!
//! Accumulated artist ids are batched (capped at the upstream limit of 50 per
//! call) and resolved to a flattened genre list, then reduced to a tally.

use std::collections::HashSet;

use tracing::debug;

use super::tally::FrequencyTally;
use super::EngagementError;
use crate::dataset::DatasetWriter;
use crate::session::{SessionTimestamp, UserContext};
use crate::spotify::{MusicApi, TrackDetail};

/// The artist batch endpoint accepts at most this many ids per call.
pub const ARTIST_BATCH_LIMIT: usize = 50;

/// Which analysis a genre resolution belongs to; used only to label the
/// persisted artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreRequestCategory {
    /// Artists gathered across the whole playlist library.
    Library,
    /// Artists gathered from the recent-history window.
    RecentlyPlayed,
}

impl GenreRequestCategory {
    pub fn label(&self) -> &'static str {
        match self {
            GenreRequestCategory::Library => "library",
            GenreRequestCategory::RecentlyPlayed => "recently_played",
        }
    }
}

/// Insertion-ordered set of artist ids accumulated across fetches.
#[derive(Debug, Default)]
pub struct ArtistIdSet {
    seen: HashSet<String>,
    order: Vec<String>,
}

impl ArtistIdSet {
    pub fn insert(&mut self, id: String) {
        if self.seen.insert(id.clone()) {
            self.order.push(id);
        }
    }

    /// Accumulate every artist id referenced by `tracks`.
    pub fn extend_from_tracks(&mut self, tracks: &[TrackDetail]) {
        for track in tracks {
            for artist in &track.artists {
                self.insert(artist.id.clone());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> &[String] {
        &self.order
    }
}

/// Resolve the genre tally for a set of artist ids.
///
/// Selects the first `ARTIST_BATCH_LIMIT` ids by insertion order and silently
/// drops the rest; callers must not assume completeness beyond that. An empty
/// set resolves to an empty tally without a remote call. Remote failure
/// propagates, never a partial tally.
pub async fn resolve_genres(
    api: &dyn MusicApi,
    writer: &DatasetWriter,
    ctx: &UserContext,
    ts: &SessionTimestamp,
    artist_ids: &ArtistIdSet,
    category: GenreRequestCategory,
) -> Result<FrequencyTally, EngagementError> {
    if artist_ids.is_empty() {
        return Ok(FrequencyTally::default());
    }

    let batch: Vec<&str> = artist_ids
        .ids()
        .iter()
        .take(ARTIST_BATCH_LIMIT)
        .map(String::as_str)
        .collect();

    if artist_ids.len() > batch.len() {
        debug!(
            total = artist_ids.len(),
            resolved = batch.len(),
            category = category.label(),
            "Artist set exceeds batch limit, dropping remainder"
        );
    }

    let ids_batch = batch.join(",");
    let genres = api
        .get_artist_genres(ctx, &ids_batch)
        .await
        .map_err(EngagementError::Genres)?;

    writer.persist(ctx, ts, &format!("artists_{}", category.label()), &genres);

    Ok(FrequencyTally::tally(genres, 0))
}
