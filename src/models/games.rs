use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::GameId;

/// Catalog entry for a board game.
#[derive(Debug, Clone, Serialize)]
pub struct Game {
    pub game_id: GameId,
    pub name: String,
    pub description: Option<String>,
    pub min_players: i64,
    pub max_players: i64,
    pub duration_minutes: i64,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a game. Id and timestamps are
/// allocated by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewGame {
    pub name: String,
    pub description: Option<String>,
    pub min_players: i64,
    pub max_players: i64,
    pub duration_minutes: i64,
    pub category: Option<String>,
}

/// Partial update for a game row. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GamePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub min_players: Option<i64>,
    pub max_players: Option<i64>,
    pub duration_minutes: Option<i64>,
    pub category: Option<String>,
}
