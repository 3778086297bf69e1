//! Response models for the Spotify Web API.
//!
//! Raw shapes mirror the wire format and default absent collection fields to
//! empty, uniformly, so callers never see "field missing" as a distinct case
//! from "empty collection". Normalized types are what the rest of the crate
//! consumes.

use serde::{Deserialize, Serialize};

// =============================================================================
// Normalized types
// =============================================================================

/// A playlist as seen by the engagement analyses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaylistSummary {
    pub id: String,
    pub owner_id: String,
    pub track_count: u64,
}

/// Reference to an artist on a track.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtistRef {
    pub name: String,
    pub id: String,
}

/// A track extracted from either a playlist page or the recent-history window.
///
/// Both raw shapes normalize to this one structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackDetail {
    pub track_name: String,
    pub artists: Vec<ArtistRef>,
}

/// An artist the user follows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FollowedArtist {
    pub name: String,
    pub follower_count: u64,
    pub popularity: f64,
}

// =============================================================================
// Raw wire shapes
// =============================================================================

/// Generic paged collection; a missing `items` field reads as empty.
#[derive(Debug, Deserialize)]
pub(crate) struct PagedItems<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPlaylist {
    pub id: String,
    pub owner: RawOwner,
    #[serde(default)]
    pub tracks: RawTrackTotal,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawOwner {
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawTrackTotal {
    #[serde(default)]
    pub total: u64,
}

/// One entry of a playlist-tracks or recently-played page.
#[derive(Debug, Deserialize)]
pub(crate) struct RawTrackItem {
    pub track: Option<RawTrack>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTrack {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<RawArtistRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawArtistRef {
    pub name: Option<String>,
    // Local tracks carry a null artist id
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArtistsResponse {
    #[serde(default = "Vec::new")]
    pub artists: Vec<RawArtistProfile>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawArtistProfile {
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPlaylistDetails {
    pub followers: Option<RawFollowers>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawFollowers {
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FollowingResponse {
    pub artists: Option<PagedItems<RawFollowedArtist>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawFollowedArtist {
    pub name: String,
    pub followers: Option<RawFollowers>,
    #[serde(default)]
    pub popularity: f64,
}

// =============================================================================
// Normalization
// =============================================================================

impl From<RawPlaylist> for PlaylistSummary {
    fn from(raw: RawPlaylist) -> Self {
        Self {
            id: raw.id,
            owner_id: raw.owner.id,
            track_count: raw.tracks.total,
        }
    }
}

impl From<RawFollowedArtist> for FollowedArtist {
    fn from(raw: RawFollowedArtist) -> Self {
        Self {
            name: raw.name,
            follower_count: raw.followers.map(|f| f.total).unwrap_or(0),
            popularity: raw.popularity,
        }
    }
}

/// Extract track details from a page of track items.
///
/// Entries without a track payload are skipped, as are artist references
/// lacking an id (local files).
pub(crate) fn extract_track_details(items: Vec<RawTrackItem>) -> Vec<TrackDetail> {
    items
        .into_iter()
        .filter_map(|item| item.track)
        .map(|track| {
            let artists = track
                .artists
                .into_iter()
                .filter_map(|artist| {
                    let id = artist.id?;
                    Some(ArtistRef {
                        name: artist.name.unwrap_or_default(),
                        id,
                    })
                })
                .collect();

            TrackDetail {
                track_name: track.name,
                artists,
            }
        })
        .collect()
}
