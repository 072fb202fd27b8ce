use crate::error::{Error, Result};
use crate::models::{Like, LikeStatus, UserId};
use crate::services::user_service;
use crate::storage::{LikeStore, UserStore};

/// Record a like or dislike. Setting a new status for an existing pair
/// overwrites the old one.
pub async fn set_like(
    store: &(impl LikeStore + UserStore),
    sender_id: UserId,
    receiver_id: UserId,
    status: LikeStatus,
) -> Result<Like> {
    user_service::get_user(store, sender_id).await?;
    user_service::get_user(store, receiver_id).await?;
    Ok(store.upsert_like(sender_id, receiver_id, status).await?)
}

/// Who liked this user, newest first. Dislikes are not reported back.
pub async fn likes_received(store: &impl LikeStore, user_id: UserId) -> Result<Vec<Like>> {
    let mut likes: Vec<Like> = store
        .list_likes_received(user_id)
        .await?
        .into_iter()
        .filter(|like| like.status == LikeStatus::Like)
        .collect();
    likes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(likes)
}

/// Whether both directed pairs exist with status LIKE.
pub async fn is_mutual_like(
    store: &impl LikeStore,
    user_a: UserId,
    user_b: UserId,
) -> Result<bool> {
    let ab = store.get_like(user_a, user_b).await?;
    let ba = store.get_like(user_b, user_a).await?;
    Ok(ab.is_some_and(|l| l.status == LikeStatus::Like)
        && ba.is_some_and(|l| l.status == LikeStatus::Like))
}

pub async fn remove_like(
    store: &impl LikeStore,
    sender_id: UserId,
    receiver_id: UserId,
) -> Result<()> {
    if !store.delete_like(sender_id, receiver_id).await? {
        return Err(Error::LikeNotFound {
            sender_id,
            receiver_id,
        });
    }
    Ok(())
}
