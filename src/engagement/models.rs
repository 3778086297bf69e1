//! Result types for the engagement analyses and the final report shape.

use serde::Serialize;

use super::tally::FrequencyTally;

/// Playlist-library statistics produced by the breadth analysis.
#[derive(Debug, Clone)]
pub struct BreadthResult {
    pub total_playlist_count: u64,
    pub created_playlist_count: u64,
    pub saved_playlist_count: u64,
    pub total_tracks_count: u64,
    pub total_playlist_followers: u64,
    pub genre_tally: FrequencyTally,
    /// Ids of playlists whose track or follower fetch failed; their
    /// contribution is missing from the aggregate rather than masked.
    pub failed_playlists: Vec<String>,
}

/// Recent-listening statistics produced by the depth analysis.
#[derive(Debug, Clone)]
pub struct DepthResult {
    pub most_replayed_tracks: FrequencyTally,
    pub genre_tally: FrequencyTally,
}

/// Followed-artist statistics.
#[derive(Debug, Clone)]
pub struct FollowingResult {
    pub total_artists_followed: usize,
    /// Arithmetic mean of popularity scores; 0.0 when nothing is followed.
    pub average_artist_popularity: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistStats {
    pub total_playlist_count: u64,
    pub total_created_playlist_count: u64,
    pub total_saved_playlist_count: u64,
    pub total_playlist_followers_count: u64,
    pub total_tracks_count: u64,
    pub failed_playlist_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MusicTasteStats {
    pub total_genres_general: usize,
    pub total_genres_recently: usize,
    pub top_general_music_genres: FrequencyTally,
    pub top_recent_music_genres: FrequencyTally,
    pub top_recently_played: FrequencyTally,
}

#[derive(Debug, Clone, Serialize)]
pub struct FollowStats {
    pub total_artist_follow_count: usize,
    /// Mean popularity rounded to the nearest whole number.
    pub artist_follow_average_popularity: u64,
}

/// The root aggregate, assembled only after all three analyses complete.
#[derive(Debug, Clone, Serialize)]
pub struct EngagementReport {
    pub playlist_stats: PlaylistStats,
    pub music_taste_stats: MusicTasteStats,
    pub follow_stats: FollowStats,
}

impl EngagementReport {
    /// Merge the three analysis outputs field-by-field.
    pub fn assemble(
        breadth: BreadthResult,
        depth: DepthResult,
        following: FollowingResult,
    ) -> Self {
        Self {
            playlist_stats: PlaylistStats {
                total_playlist_count: breadth.total_playlist_count,
                total_created_playlist_count: breadth.created_playlist_count,
                total_saved_playlist_count: breadth.saved_playlist_count,
                total_playlist_followers_count: breadth.total_playlist_followers,
                total_tracks_count: breadth.total_tracks_count,
                failed_playlist_ids: breadth.failed_playlists,
            },
            music_taste_stats: MusicTasteStats {
                total_genres_general: breadth.genre_tally.len(),
                total_genres_recently: depth.genre_tally.len(),
                top_general_music_genres: breadth.genre_tally,
                top_recent_music_genres: depth.genre_tally,
                top_recently_played: depth.most_replayed_tracks,
            },
            follow_stats: FollowStats {
                total_artist_follow_count: following.total_artists_followed,
                // Precision is kept until this final rounding
                artist_follow_average_popularity: following.average_artist_popularity.round()
                    as u64,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_breadth() -> BreadthResult {
        BreadthResult {
            total_playlist_count: 2,
            created_playlist_count: 1,
            saved_playlist_count: 1,
            total_tracks_count: 8,
            total_playlist_followers: 42,
            genre_tally: FrequencyTally::tally(
                vec!["rock".to_string(), "rock".to_string(), "pop".to_string()],
                0,
            ),
            failed_playlists: vec![],
        }
    }

    #[test]
    fn test_assemble_merges_field_by_field() {
        let depth = DepthResult {
            most_replayed_tracks: FrequencyTally::tally(
                vec!["Song A".to_string(), "Song A".to_string()],
                0,
            ),
            genre_tally: FrequencyTally::tally(vec!["pop".to_string()], 0),
        };
        let following = FollowingResult {
            total_artists_followed: 3,
            average_artist_popularity: 20.0,
        };

        let report = EngagementReport::assemble(sample_breadth(), depth, following);

        assert_eq!(report.playlist_stats.total_playlist_count, 2);
        assert_eq!(report.playlist_stats.total_tracks_count, 8);
        assert_eq!(report.music_taste_stats.total_genres_general, 2);
        assert_eq!(report.music_taste_stats.total_genres_recently, 1);
        assert_eq!(report.follow_stats.total_artist_follow_count, 3);
        assert_eq!(report.follow_stats.artist_follow_average_popularity, 20);
    }

    #[test]
    fn test_average_popularity_rounds_to_nearest() {
        let depth = DepthResult {
            most_replayed_tracks: FrequencyTally::default(),
            genre_tally: FrequencyTally::default(),
        };
        let following = FollowingResult {
            total_artists_followed: 3,
            average_artist_popularity: 19.5,
        };

        let report = EngagementReport::assemble(sample_breadth(), depth, following);
        assert_eq!(report.follow_stats.artist_follow_average_popularity, 20);
    }

    #[test]
    fn test_report_serializes_expected_field_names() {
        let depth = DepthResult {
            most_replayed_tracks: FrequencyTally::default(),
            genre_tally: FrequencyTally::default(),
        };
        let following = FollowingResult {
            total_artists_followed: 0,
            average_artist_popularity: 0.0,
        };

        let json = serde_json::to_value(EngagementReport::assemble(
            sample_breadth(),
            depth,
            following,
        ))
        .unwrap();

        assert!(json["playlist_stats"]["total_created_playlist_count"].is_u64());
        assert!(json["music_taste_stats"]["top_general_music_genres"].is_object());
        assert_eq!(json["follow_stats"]["total_artist_follow_count"], 0);
    }
}
