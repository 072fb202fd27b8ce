use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// Sympathy expressed by one user towards another. Serialized with the
/// wire values the mobile clients already use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LikeStatus {
    Like,
    Dislike,
}

/// At most one row per directed (sender, receiver) pair; setting a new
/// status overwrites the old one.
#[derive(Debug, Clone, Serialize)]
pub struct Like {
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub status: LikeStatus,
    pub created_at: DateTime<Utc>,
}
