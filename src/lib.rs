//! Music Engagement Aggregation Library
//!
//! Aggregates a user's listening behavior from the Spotify Web API into a
//! single engagement report: playlist breadth, genre diversity, replay depth
//! and artist-following statistics.

pub mod config;
pub mod dataset;
pub mod engagement;
pub mod session;
pub mod spotify;

// Re-export commonly used types for convenience
pub use dataset::{DatasetSink, DatasetWriter, LocalFsDatasetSink, NoOpDatasetSink};
pub use engagement::{EngagementError, EngagementReport, EngagementRepository};
pub use session::{SessionTimestamp, UserContext};
pub use spotify::{MusicApi, SpotifyClient};
