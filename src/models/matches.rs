use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Pending,
    Accepted,
    Rejected,
    Blocked,
}

/// A meetup request between two users, with an optional invitation
/// message. One row per directed (sender, receiver) pair; the reverse
/// direction is a separate request.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRequest {
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub message: Option<String>,
    pub status: MatchStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
