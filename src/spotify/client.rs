//! HTTP client for the Spotify Web API.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::models::*;
use super::trait_def::MusicApi;
use crate::session::UserContext;

/// Items fetched per page for tracks, history and followed artists.
const PAGE_LIMIT: u32 = 50;

/// Client for the Spotify Web API.
///
/// All requests carry the per-request bearer token from the `UserContext`
/// and share one connection pool with a fixed timeout.
#[derive(Clone)]
pub struct SpotifyClient {
    client: reqwest::Client,
    base_url: String,
    playlist_batch_limit: u32,
    market: String,
}

impl SpotifyClient {
    /// Create a new SpotifyClient.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the API (e.g., "https://api.spotify.com/v1")
    /// * `timeout_sec` - Request timeout in seconds
    /// * `playlist_batch_limit` - Page size for the playlist collection fetch
    /// * `market` - Market code for playlist-track requests
    pub fn new(
        base_url: String,
        timeout_sec: u64,
        playlist_batch_limit: u32,
        market: String,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()?;

        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            playlist_batch_limit,
            market,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, ctx: &UserContext, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&ctx.access_token)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        let status = response.status();
        debug!(%status, url, "Streaming API response");

        if !status.is_success() {
            anyhow::bail!("Streaming API request to {} failed with status {}", url, status);
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from {}", url))
    }
}

#[async_trait]
impl MusicApi for SpotifyClient {
    async fn get_user_playlists(&self, ctx: &UserContext) -> Result<Vec<PlaylistSummary>> {
        let url = format!(
            "{}/me/playlists?limit={}",
            self.base_url, self.playlist_batch_limit
        );
        let page: PagedItems<RawPlaylist> = self.get_json(ctx, &url).await?;
        Ok(page.items.into_iter().map(PlaylistSummary::from).collect())
    }

    async fn get_playlist_tracks(
        &self,
        ctx: &UserContext,
        playlist_id: &str,
    ) -> Result<Vec<TrackDetail>> {
        let url = format!(
            "{}/playlists/{}/tracks?market={}&limit={}",
            self.base_url, playlist_id, self.market, PAGE_LIMIT
        );
        let page: PagedItems<RawTrackItem> = self.get_json(ctx, &url).await?;
        Ok(extract_track_details(page.items))
    }

    async fn get_recent_tracks(&self, ctx: &UserContext) -> Result<Vec<TrackDetail>> {
        let url = format!(
            "{}/me/player/recently-played?limit={}",
            self.base_url, PAGE_LIMIT
        );
        let page: PagedItems<RawTrackItem> = self.get_json(ctx, &url).await?;
        Ok(extract_track_details(page.items))
    }

    async fn get_artist_genres(&self, ctx: &UserContext, ids_batch: &str) -> Result<Vec<String>> {
        let url = format!(
            "{}/artists?ids={}",
            self.base_url,
            urlencoding::encode(ids_batch)
        );
        let response: ArtistsResponse = self.get_json(ctx, &url).await?;

        let genres: Vec<String> = response
            .artists
            .into_iter()
            .flat_map(|artist| artist.genres)
            .collect();

        debug!(total_genres = genres.len(), "Fetched artist genres");
        Ok(genres)
    }

    async fn get_playlist_follower_count(
        &self,
        ctx: &UserContext,
        playlist_id: &str,
    ) -> Result<u64> {
        let url = format!("{}/playlists/{}", self.base_url, playlist_id);
        let details: RawPlaylistDetails = self.get_json(ctx, &url).await?;
        Ok(details.followers.map(|f| f.total).unwrap_or(0))
    }

    async fn get_followed_artists(&self, ctx: &UserContext) -> Result<Vec<FollowedArtist>> {
        let url = format!(
            "{}/me/following?type=artist&limit={}",
            self.base_url, PAGE_LIMIT
        );
        let response: FollowingResponse = self.get_json(ctx, &url).await?;

        Ok(response
            .artists
            .map(|page| page.items)
            .unwrap_or_default()
            .into_iter()
            .map(FollowedArtist::from)
            .collect())
    }
}
