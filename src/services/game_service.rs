use crate::error::{Error, Result};
use crate::models::{Game, GameId, GamePatch, NewGame};
use crate::storage::GameStore;

pub async fn all_games(store: &impl GameStore) -> Result<Vec<Game>> {
    Ok(store.list_games().await?)
}

pub async fn get_game(store: &impl GameStore, game_id: GameId) -> Result<Game> {
    store
        .get_game(game_id)
        .await?
        .ok_or(Error::GameNotFound(game_id))
}

pub async fn create_game(store: &impl GameStore, new_game: NewGame) -> Result<Game> {
    if new_game.name.trim().is_empty() {
        return Err(Error::Validation("game name must not be empty".into()));
    }
    if new_game.min_players < 1 {
        return Err(Error::Validation("min_players must be at least 1".into()));
    }
    if new_game.max_players < new_game.min_players {
        return Err(Error::Validation(
            "max_players must be at least min_players".into(),
        ));
    }
    if new_game.duration_minutes < 1 {
        return Err(Error::Validation(
            "duration_minutes must be at least 1".into(),
        ));
    }

    Ok(store.insert_game(new_game).await?)
}

pub async fn update_game(
    store: &impl GameStore,
    game_id: GameId,
    patch: GamePatch,
) -> Result<Game> {
    if let Some(name) = patch.name.as_deref() {
        if name.trim().is_empty() {
            return Err(Error::Validation("game name must not be empty".into()));
        }
    }
    if let Some(min_players) = patch.min_players {
        if min_players < 1 {
            return Err(Error::Validation("min_players must be at least 1".into()));
        }
    }
    if let (Some(min_players), Some(max_players)) = (patch.min_players, patch.max_players) {
        if max_players < min_players {
            return Err(Error::Validation(
                "max_players must be at least min_players".into(),
            ));
        }
    }
    if let Some(duration_minutes) = patch.duration_minutes {
        if duration_minutes < 1 {
            return Err(Error::Validation(
                "duration_minutes must be at least 1".into(),
            ));
        }
    }

    store
        .update_game(game_id, patch)
        .await?
        .ok_or(Error::GameNotFound(game_id))
}

pub async fn delete_game(store: &impl GameStore, game_id: GameId) -> Result<()> {
    if !store.delete_game(game_id).await? {
        return Err(Error::GameNotFound(game_id));
    }
    Ok(())
}
