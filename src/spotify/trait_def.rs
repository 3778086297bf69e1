//! MusicApi trait definition.
//!
//! Abstracts the remote streaming API so the engagement analyses can be
//! driven by the real client or by a test double.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{FollowedArtist, PlaylistSummary, TrackDetail};
use crate::session::UserContext;

/// Capability interface over the remote streaming API.
///
/// Every call may fail; failure is a first-class outcome handled by the
/// analyses, never assumed away.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait MusicApi: Send + Sync {
    /// The user's full playlist collection (single page, bounded upstream).
    async fn get_user_playlists(&self, ctx: &UserContext) -> Result<Vec<PlaylistSummary>>;

    /// First page of tracks (at most 50) for one playlist.
    async fn get_playlist_tracks(
        &self,
        ctx: &UserContext,
        playlist_id: &str,
    ) -> Result<Vec<TrackDetail>>;

    /// The most recent listening-history window (at most 50 items).
    async fn get_recent_tracks(&self, ctx: &UserContext) -> Result<Vec<TrackDetail>>;

    /// Flattened genre list for a comma-joined batch of artist ids.
    async fn get_artist_genres(&self, ctx: &UserContext, ids_batch: &str) -> Result<Vec<String>>;

    /// Follower count for one playlist.
    async fn get_playlist_follower_count(
        &self,
        ctx: &UserContext,
        playlist_id: &str,
    ) -> Result<u64>;

    /// Artists the user follows (at most 50).
    async fn get_followed_artists(&self, ctx: &UserContext) -> Result<Vec<FollowedArtist>>;
}
