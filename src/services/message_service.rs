use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::models::{Conversation, Message, UserId};
use crate::services::user_service;
use crate::storage::{MessageStore, UserStore};

pub async fn send_message(
    store: &(impl MessageStore + UserStore),
    sender_id: UserId,
    receiver_id: UserId,
    content: &str,
) -> Result<Message> {
    let content = content.trim();
    if content.is_empty() {
        return Err(Error::Validation("message content must not be empty".into()));
    }
    user_service::get_user(store, sender_id).await?;
    user_service::get_user(store, receiver_id).await?;

    Ok(store
        .insert_message(sender_id, receiver_id, content.to_string())
        .await?)
}

/// Both directions between two users, oldest first.
pub async fn conversation(
    store: &impl MessageStore,
    user_a: UserId,
    user_b: UserId,
) -> Result<Vec<Message>> {
    let mut messages = store.list_between(user_a, user_b).await?;
    messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Ok(messages)
}

/// The user's inbox: one entry per peer, carrying the newest message and
/// the number of their messages still unread. Ordered by recency of the
/// newest message.
pub async fn user_conversations(
    store: &impl MessageStore,
    user_id: UserId,
) -> Result<Vec<Conversation>> {
    let mut messages = store.list_for(user_id).await?;
    messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut conversations: Vec<Conversation> = Vec::new();
    let mut index: HashMap<UserId, usize> = HashMap::new();

    for message in messages {
        let peer_id = if message.sender_id == user_id {
            message.receiver_id
        } else {
            message.sender_id
        };

        let unread = !message.is_read && message.receiver_id == user_id;
        match index.get(&peer_id) {
            Some(&i) => {
                if unread {
                    conversations[i].unread_count += 1;
                }
            }
            None => {
                index.insert(peer_id, conversations.len());
                conversations.push(Conversation {
                    peer_id,
                    unread_count: usize::from(unread),
                    last_message: message,
                });
            }
        }
    }

    Ok(conversations)
}

/// Mark everything `sender_id` sent to `receiver_id` as read. Returns
/// the number of messages that changed.
pub async fn mark_read(
    store: &impl MessageStore,
    sender_id: UserId,
    receiver_id: UserId,
) -> Result<u64> {
    Ok(store.mark_read(sender_id, receiver_id).await?)
}

/// Unread messages addressed to the user, newest first.
pub async fn unread_messages(store: &impl MessageStore, user_id: UserId) -> Result<Vec<Message>> {
    let mut messages = store.list_unread(user_id).await?;
    messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(messages)
}
