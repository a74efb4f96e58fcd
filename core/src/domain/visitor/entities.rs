use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

/// An anonymous client identified by its session header.
///
/// The raw session id never reaches storage; only its hash does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Visitor {
    pub id: Uuid,
    pub session_key: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub total_analyses: i32,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl Visitor {
    pub fn new(session_id: &str, ip_address: Option<String>, user_agent: Option<String>) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            session_key: hash_session_id(session_id),
            ip_address,
            user_agent,
            total_analyses: 0,
            created_at: now,
            last_activity: now,
        }
    }
}

/// First 16 bytes of the SHA-256 of the session id, hex encoded.
pub fn hash_session_id(session_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(session_id.trim().as_bytes());
    let hash = hasher.finalize();
    hex::encode(&hash[..16])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_key_is_stable_and_short() {
        let a = hash_session_id("abc-123");
        let b = hash_session_id(" abc-123 ");

        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
        assert_ne!(a, hash_session_id("abc-124"));
    }

    #[test]
    fn new_visitor_starts_with_no_analyses() {
        let visitor = Visitor::new("session", Some("10.0.0.1".to_string()), None);

        assert_eq!(visitor.total_analyses, 0);
        assert_eq!(visitor.created_at, visitor.last_activity);
        assert_eq!(visitor.session_key, hash_session_id("session"));
    }
}
