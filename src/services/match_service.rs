use tracing::info;

use crate::error::{Error, Result};
use crate::models::{MatchRequest, MatchStatus, UserId};
use crate::services::user_service;
use crate::storage::{MatchStore, UserStore};

/// Every match request the user is part of, most recently updated first.
pub async fn user_matches(store: &impl MatchStore, user_id: UserId) -> Result<Vec<MatchRequest>> {
    let mut matches = store.list_matches_for(user_id).await?;
    matches.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    Ok(matches)
}

/// Send a meetup request. At most one request per directed pair.
pub async fn create_match(
    store: &(impl MatchStore + UserStore),
    sender_id: UserId,
    receiver_id: UserId,
    message: Option<String>,
) -> Result<MatchRequest> {
    user_service::get_user(store, sender_id).await?;
    user_service::get_user(store, receiver_id).await?;

    if store.get_match(sender_id, receiver_id).await?.is_some() {
        return Err(Error::MatchAlreadyExists {
            sender_id,
            receiver_id,
        });
    }

    let request = store.insert_match(sender_id, receiver_id, message).await?;
    info!(
        "🤝 match request sent from user {} to user {}",
        sender_id, receiver_id
    );
    Ok(request)
}

pub async fn update_match_status(
    store: &impl MatchStore,
    sender_id: UserId,
    receiver_id: UserId,
    status: MatchStatus,
) -> Result<MatchRequest> {
    store
        .update_match_status(sender_id, receiver_id, status)
        .await?
        .ok_or(Error::MatchNotFound {
            sender_id,
            receiver_id,
        })
}

/// Requests the user is part of that both sides settled on.
pub async fn accepted_matches(
    store: &impl MatchStore,
    user_id: UserId,
) -> Result<Vec<MatchRequest>> {
    let matches = user_matches(store, user_id).await?;
    Ok(matches
        .into_iter()
        .filter(|m| m.status == MatchStatus::Accepted)
        .collect())
}
