use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::geo::GeoPoint;
use super::{GameId, UserId};

/// Account row plus the owned-game snapshot. Credentials (password hash,
/// tokens) live in the external identity layer, not here.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub user_id: UserId,
    pub email: String,
    pub name: String,
    pub is_active: bool,
    pub owned_games: Vec<GameId>,
    pub created_at: DateTime<Utc>,
}

/// Profile row. Created lazily on the first location update, so most
/// fields start out empty.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub user_id: UserId,
    pub bio: Option<String>,
    pub age: Option<i64>,
    pub city: Option<String>,
    pub location: Option<GeoPoint>,
}

impl Profile {
    /// An empty profile row for `user_id`, used by the upsert path.
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            bio: None,
            age: None,
            city: None,
            location: None,
        }
    }
}

/// Fields accepted when registering a user.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub name: String,
}

/// Partial update for an account row. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub email: Option<String>,
    pub name: Option<String>,
    pub is_active: Option<bool>,
}
