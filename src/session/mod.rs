//! Request-scoped identity and session timestamping.
//!
//! A `UserContext` carries the credentials for remote calls plus a one-way
//! hashed user key that namespaces persisted artifacts without storing raw
//! identity. A `SessionTimestamp` is generated once per orchestration run
//! and shared read-only by all sub-analyses so their snapshots line up.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// User identity and credentials for one aggregation request.
///
/// Immutable once constructed; owned by the request scope that created it.
#[derive(Debug, Clone)]
pub struct UserContext {
    /// Bearer token for the streaming API.
    pub access_token: String,
    /// Raw user id as known to the streaming API.
    pub user_id: String,
    /// SHA-256 hex digest of `user_id`, used in persisted artifact paths.
    pub derived_user_key: String,
}

impl UserContext {
    pub fn new(access_token: impl Into<String>, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        let mut hasher = Sha256::new();
        hasher.update(user_id.as_bytes());
        let derived_user_key = format!("{:x}", hasher.finalize());

        Self {
            access_token: access_token.into(),
            user_id,
            derived_user_key,
        }
    }
}

/// Business date and instant shared by all analyses in one orchestration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTimestamp {
    /// Calendar date in `YYYY-MM-DD` form.
    pub business_date: String,
    /// Epoch milliseconds at which the run started.
    pub session_instant: i64,
}

impl SessionTimestamp {
    /// Timestamp for the current instant.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self {
            business_date: instant.format("%Y-%m-%d").to_string(),
            session_instant: instant.timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_derived_key_is_deterministic() {
        let a = UserContext::new("token-a", "some-user");
        let b = UserContext::new("token-b", "some-user");
        assert_eq!(a.derived_user_key, b.derived_user_key);
    }

    #[test]
    fn test_derived_key_differs_per_user() {
        let a = UserContext::new("token", "user-1");
        let b = UserContext::new("token", "user-2");
        assert_ne!(a.derived_user_key, b.derived_user_key);
    }

    #[test]
    fn test_derived_key_is_hex_sha256() {
        let ctx = UserContext::new("token", "user-1");
        assert_eq!(ctx.derived_user_key.len(), 64);
        assert!(ctx.derived_user_key.chars().all(|c| c.is_ascii_hexdigit()));
        // Key never contains the raw id
        assert!(!ctx.derived_user_key.contains("user-1"));
    }

    #[test]
    fn test_session_timestamp_shape() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 7, 15, 30, 0).unwrap();
        let ts = SessionTimestamp::from_datetime(instant);
        assert_eq!(ts.business_date, "2024-03-07");
        assert_eq!(ts.session_instant, instant.timestamp_millis());
    }
}
