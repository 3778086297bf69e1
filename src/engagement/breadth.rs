//! Breadth analysis: statistics over the user's entire playlist library.

use tracing::{info, warn};

use super::genres::{resolve_genres, ArtistIdSet, GenreRequestCategory};
use super::models::BreadthResult;
use super::EngagementError;
use crate::dataset::DatasetWriter;
use crate::session::{SessionTimestamp, UserContext};
use crate::spotify::MusicApi;

/// Compute playlist-library statistics.
///
/// Fans out one tracks fetch and one follower-count fetch per playlist, joins
/// them all, then resolves genres for the accumulated artist set. A failing
/// per-playlist fetch does not poison the aggregate: its playlist id is
/// recorded in `failed_playlists` and the successes proceed.
pub async fn analyze_breadth(
    api: &dyn MusicApi,
    writer: &DatasetWriter,
    ctx: &UserContext,
    ts: &SessionTimestamp,
) -> Result<BreadthResult, EngagementError> {
    let playlists = api
        .get_user_playlists(ctx)
        .await
        .map_err(EngagementError::Playlists)?;

    let (created, saved): (Vec<_>, Vec<_>) = playlists
        .iter()
        .partition(|playlist| playlist.owner_id == ctx.user_id);
    let total_tracks_count: u64 = playlists.iter().map(|p| p.track_count).sum();

    writer.persist(ctx, ts, "created", &created);
    writer.persist(ctx, ts, "saved", &saved);

    let created_count = created.len() as u64;
    let saved_count = saved.len() as u64;

    // Fan out both fetch kinds for every playlist; they are independent of
    // each other and of all other playlists' fetches.
    let track_fetches = playlists.iter().map(|playlist| {
        let id = playlist.id.clone();
        async move {
            let outcome = api.get_playlist_tracks(ctx, &id).await;
            (id, outcome)
        }
    });
    let follower_fetches = playlists.iter().map(|playlist| {
        let id = playlist.id.clone();
        async move {
            let outcome = api.get_playlist_follower_count(ctx, &id).await;
            (id, outcome)
        }
    });

    // Join barrier: genre resolution must not start before every
    // per-playlist operation has settled.
    let (track_outcomes, follower_outcomes) = futures::future::join(
        futures::future::join_all(track_fetches),
        futures::future::join_all(follower_fetches),
    )
    .await;

    let mut artist_ids = ArtistIdSet::default();
    let mut total_playlist_followers: u64 = 0;
    let mut failed_playlists: Vec<String> = Vec::new();

    for (playlist_id, outcome) in track_outcomes {
        match outcome {
            Ok(tracks) => {
                writer.persist(ctx, ts, &format!("playlist_{}_tracks", playlist_id), &tracks);
                artist_ids.extend_from_tracks(&tracks);
            }
            Err(e) => {
                warn!(playlist_id = %playlist_id, "Failed to fetch playlist tracks: {:#}", e);
                failed_playlists.push(playlist_id);
            }
        }
    }

    for (playlist_id, outcome) in follower_outcomes {
        match outcome {
            Ok(count) => total_playlist_followers += count,
            Err(e) => {
                warn!(playlist_id = %playlist_id, "Failed to fetch playlist followers: {:#}", e);
                failed_playlists.push(playlist_id);
            }
        }
    }

    failed_playlists.sort();
    failed_playlists.dedup();

    let genre_tally = resolve_genres(
        api,
        writer,
        ctx,
        ts,
        &artist_ids,
        GenreRequestCategory::Library,
    )
    .await?;

    info!(
        playlists = playlists.len(),
        created = created_count,
        saved = saved_count,
        distinct_artists = artist_ids.len(),
        genres = genre_tally.len(),
        failed_playlists = failed_playlists.len(),
        "Breadth analysis complete"
    );

    Ok(BreadthResult {
        total_playlist_count: playlists.len() as u64,
        created_playlist_count: created_count,
        saved_playlist_count: saved_count,
        total_tracks_count,
        total_playlist_followers,
        genre_tally,
        failed_playlists,
    })
}
