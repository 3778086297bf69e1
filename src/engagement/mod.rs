//! Engagement aggregation core.
//!
//! Fans out the breadth, depth and following analyses over the streaming
//! API, merges their partial results under cooperative concurrency and
//! reduces raw collections into ranked frequency tallies.

mod breadth;
mod depth;
mod following;
mod genres;
mod models;
mod repository;
mod tally;

pub use breadth::analyze_breadth;
pub use depth::analyze_depth;
pub use following::analyze_following;
pub use genres::{resolve_genres, ArtistIdSet, GenreRequestCategory, ARTIST_BATCH_LIMIT};
pub use models::{
    BreadthResult, DepthResult, EngagementReport, FollowStats, FollowingResult, MusicTasteStats,
    PlaylistStats,
};
pub use repository::EngagementRepository;
pub use tally::FrequencyTally;

use thiserror::Error;

/// Errors that can abort an engagement analysis.
#[derive(Debug, Error)]
pub enum EngagementError {
    #[error("Failed to fetch user playlists: {0}")]
    Playlists(#[source] anyhow::Error),

    #[error("Failed to fetch recent tracks: {0}")]
    RecentTracks(#[source] anyhow::Error),

    #[error("Failed to resolve artist genres: {0}")]
    Genres(#[source] anyhow::Error),

    #[error("Failed to fetch followed artists: {0}")]
    FollowedArtists(#[source] anyhow::Error),
}
