//! Spotify Web API capability: trait, models and the reqwest client.

mod client;
mod models;
mod trait_def;

pub use client::SpotifyClient;
pub use models::{ArtistRef, FollowedArtist, PlaylistSummary, TrackDetail};
pub use trait_def::MusicApi;

#[cfg(feature = "mock")]
pub use trait_def::MockMusicApi;
