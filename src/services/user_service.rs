use std::collections::HashSet;

use tracing::info;

use crate::error::{Error, Result};
use crate::models::{GameId, NewUser, User, UserId, UserPatch};
use crate::storage::{GameStore, UserStore};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

pub async fn get_user(store: &impl UserStore, user_id: UserId) -> Result<User> {
    store
        .get_user(user_id)
        .await?
        .ok_or(Error::UserNotFound(user_id))
}

/// Newest accounts first. `take` is clamped to 1..=[`MAX_PAGE_SIZE`].
pub async fn list_users(store: &impl UserStore, skip: usize, take: usize) -> Result<Vec<User>> {
    let take = take.clamp(1, MAX_PAGE_SIZE);
    Ok(store.list_users(skip, take).await?)
}

pub async fn create_user(store: &impl UserStore, new_user: NewUser) -> Result<User> {
    let email = new_user.email.trim().to_string();
    if email.is_empty() || !email.contains('@') {
        return Err(Error::Validation("a valid email is required".into()));
    }
    let name = new_user.name.trim().to_string();
    if name.is_empty() {
        return Err(Error::Validation("name must not be empty".into()));
    }

    let user = store.insert_user(NewUser { email, name }).await?;
    info!("👤 registered user {} ({})", user.user_id, user.email);
    Ok(user)
}

pub async fn update_user(
    store: &impl UserStore,
    user_id: UserId,
    patch: UserPatch,
) -> Result<User> {
    if let Some(email) = patch.email.as_deref() {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(Error::Validation("a valid email is required".into()));
        }
    }
    if let Some(name) = patch.name.as_deref() {
        if name.trim().is_empty() {
            return Err(Error::Validation("name must not be empty".into()));
        }
    }

    store
        .update_user(user_id, patch)
        .await?
        .ok_or(Error::UserNotFound(user_id))
}

pub async fn delete_user(store: &impl UserStore, user_id: UserId) -> Result<()> {
    if !store.delete_user(user_id).await? {
        return Err(Error::UserNotFound(user_id));
    }
    info!("👤 deleted user {}", user_id);
    Ok(())
}

/// Replace the user's owned-game set. Every id must resolve to a
/// catalog entry; duplicates are collapsed, first occurrence wins.
pub async fn set_owned_games(
    store: &(impl UserStore + GameStore),
    user_id: UserId,
    game_ids: Vec<GameId>,
) -> Result<User> {
    let mut seen = HashSet::new();
    let game_ids: Vec<GameId> = game_ids.into_iter().filter(|id| seen.insert(*id)).collect();

    for game_id in &game_ids {
        if store.get_game(*game_id).await?.is_none() {
            return Err(Error::GameNotFound(*game_id));
        }
    }

    store
        .set_owned_games(user_id, game_ids)
        .await?
        .ok_or(Error::UserNotFound(user_id))
}

/// Active users owning at least one of `game_ids`, excluding the
/// subject. An empty id list matches nobody.
pub async fn find_users_by_games(
    store: &impl UserStore,
    game_ids: &[GameId],
    exclude_user_id: UserId,
) -> Result<Vec<User>> {
    if game_ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(store.list_users_owning(game_ids, exclude_user_id).await?)
}
