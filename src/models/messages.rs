use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{MessageId, UserId};

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message_id: MessageId,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// One inbox entry: the peer, the newest message exchanged with them and
/// how many of their messages are still unread.
#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    pub peer_id: UserId,
    pub last_message: Message,
    pub unread_count: usize,
}
