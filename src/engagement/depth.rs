//! Depth analysis: statistics over the recent listening history only.

use tracing::info;

use super::genres::{resolve_genres, ArtistIdSet, GenreRequestCategory};
use super::models::DepthResult;
use super::tally::FrequencyTally;
use super::EngagementError;
use crate::dataset::DatasetWriter;
use crate::session::{SessionTimestamp, UserContext};
use crate::spotify::MusicApi;

/// Compute recent-listening statistics from the latest history window.
///
/// Any failure in the history fetch or genre resolution aborts the whole
/// analysis; there is no partial depth result.
pub async fn analyze_depth(
    api: &dyn MusicApi,
    writer: &DatasetWriter,
    ctx: &UserContext,
    ts: &SessionTimestamp,
) -> Result<DepthResult, EngagementError> {
    let recent_tracks = api
        .get_recent_tracks(ctx)
        .await
        .map_err(EngagementError::RecentTracks)?;

    writer.persist(ctx, ts, "recently_played_tracks", &recent_tracks);

    let mut artist_ids = ArtistIdSet::default();
    artist_ids.extend_from_tracks(&recent_tracks);

    let track_names: Vec<String> = recent_tracks
        .iter()
        .map(|track| track.track_name.clone())
        .collect();
    let most_replayed_tracks = FrequencyTally::tally(track_names, 0);

    let genre_tally = resolve_genres(
        api,
        writer,
        ctx,
        ts,
        &artist_ids,
        GenreRequestCategory::RecentlyPlayed,
    )
    .await?;

    info!(
        recent_tracks = recent_tracks.len(),
        distinct_tracks = most_replayed_tracks.len(),
        genres = genre_tally.len(),
        "Depth analysis complete"
    );

    Ok(DepthResult {
        most_replayed_tracks,
        genre_tally,
    })
}
