//! Following analysis: aggregate statistics over followed artists.

use tracing::info;

use super::models::FollowingResult;
use super::EngagementError;
use crate::dataset::DatasetWriter;
use crate::session::{SessionTimestamp, UserContext};
use crate::spotify::MusicApi;

/// Compute followed-artist count and mean popularity.
///
/// The mean is 0.0 when nothing is followed; full precision is retained
/// here and only rounded in the final report.
pub async fn analyze_following(
    api: &dyn MusicApi,
    writer: &DatasetWriter,
    ctx: &UserContext,
    ts: &SessionTimestamp,
) -> Result<FollowingResult, EngagementError> {
    let followed_artists = api
        .get_followed_artists(ctx)
        .await
        .map_err(EngagementError::FollowedArtists)?;

    writer.persist(ctx, ts, "followed_artists", &followed_artists);

    let total_artists_followed = followed_artists.len();
    let average_artist_popularity = if total_artists_followed == 0 {
        0.0
    } else {
        let total: f64 = followed_artists.iter().map(|a| a.popularity).sum();
        total / total_artists_followed as f64
    };

    info!(
        followed_artists = total_artists_followed,
        average_popularity = average_artist_popularity,
        "Following analysis complete"
    );

    Ok(FollowingResult {
        total_artists_followed,
        average_artist_popularity,
    })
}
