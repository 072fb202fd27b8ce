//! Storage collaborator interface. The production relational store lives
//! outside this crate; everything here is the contract it implements,
//! plus an in-memory implementation for tests and the demo seeder.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::models::{
    Candidate, Game, GameId, GamePatch, GeoPoint, Like, LikeStatus, MatchRequest, MatchStatus,
    Message, NewGame, NewUser, Profile, User, UserId, UserPatch,
};

/// Errors raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage backend error: {reason}")]
    Backend {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Profile and geolocation access used by the proximity queries.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Profile row for a user, if one exists.
    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, StoreError>;

    /// Create the profile row if absent, otherwise overwrite its
    /// coordinates. Returns the row as stored.
    async fn upsert_location(
        &self,
        user_id: UserId,
        location: GeoPoint,
    ) -> Result<Profile, StoreError>;

    /// Candidate snapshots for every active user with coordinates set,
    /// excluding `exclude_user_id`.
    async fn list_candidates(&self, exclude_user_id: UserId)
        -> Result<Vec<Candidate>, StoreError>;
}

/// Account rows. Listing is newest-first so skip/take paging is stable.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, user_id: UserId) -> Result<Option<User>, StoreError>;

    async fn list_users(&self, skip: usize, take: usize) -> Result<Vec<User>, StoreError>;

    async fn insert_user(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// `None` when the user does not exist.
    async fn update_user(
        &self,
        user_id: UserId,
        patch: UserPatch,
    ) -> Result<Option<User>, StoreError>;

    /// `false` when the user did not exist.
    async fn delete_user(&self, user_id: UserId) -> Result<bool, StoreError>;

    /// Replace the user's owned-game set. `None` when the user does not
    /// exist.
    async fn set_owned_games(
        &self,
        user_id: UserId,
        game_ids: Vec<GameId>,
    ) -> Result<Option<User>, StoreError>;

    /// Active users owning at least one of `game_ids`, excluding
    /// `exclude_user_id`.
    async fn list_users_owning(
        &self,
        game_ids: &[GameId],
        exclude_user_id: UserId,
    ) -> Result<Vec<User>, StoreError>;
}

#[async_trait]
pub trait GameStore: Send + Sync {
    async fn get_game(&self, game_id: GameId) -> Result<Option<Game>, StoreError>;

    async fn list_games(&self) -> Result<Vec<Game>, StoreError>;

    async fn insert_game(&self, new_game: NewGame) -> Result<Game, StoreError>;

    /// `None` when the game does not exist.
    async fn update_game(
        &self,
        game_id: GameId,
        patch: GamePatch,
    ) -> Result<Option<Game>, StoreError>;

    /// `false` when the game did not exist.
    async fn delete_game(&self, game_id: GameId) -> Result<bool, StoreError>;
}

/// Directed (sender, receiver) like rows.
#[async_trait]
pub trait LikeStore: Send + Sync {
    async fn get_like(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
    ) -> Result<Option<Like>, StoreError>;

    /// Insert the row or overwrite its status if it already exists.
    async fn upsert_like(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
        status: LikeStatus,
    ) -> Result<Like, StoreError>;

    /// Every like row pointing at `receiver_id`, any status, unordered.
    async fn list_likes_received(&self, receiver_id: UserId) -> Result<Vec<Like>, StoreError>;

    /// `false` when the row did not exist.
    async fn delete_like(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
    ) -> Result<bool, StoreError>;
}

/// Directed (sender, receiver) match-request rows.
#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn get_match(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
    ) -> Result<Option<MatchRequest>, StoreError>;

    /// Insert a new PENDING row. The caller checks for duplicates first.
    async fn insert_match(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
        message: Option<String>,
    ) -> Result<MatchRequest, StoreError>;

    /// Set the status and bump `updated_at`. `None` when the row does
    /// not exist.
    async fn update_match_status(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
        status: MatchStatus,
    ) -> Result<Option<MatchRequest>, StoreError>;

    /// Rows where the user is sender or receiver, unordered.
    async fn list_matches_for(&self, user_id: UserId) -> Result<Vec<MatchRequest>, StoreError>;
}

#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn insert_message(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
        content: String,
    ) -> Result<Message, StoreError>;

    /// Both directions between two users, unordered.
    async fn list_between(&self, user_a: UserId, user_b: UserId)
        -> Result<Vec<Message>, StoreError>;

    /// Every message the user sent or received, unordered.
    async fn list_for(&self, user_id: UserId) -> Result<Vec<Message>, StoreError>;

    /// Mark everything from `sender_id` to `receiver_id` read. Returns
    /// the number of rows that changed.
    async fn mark_read(&self, sender_id: UserId, receiver_id: UserId) -> Result<u64, StoreError>;

    /// Unread messages addressed to `receiver_id`, unordered.
    async fn list_unread(&self, receiver_id: UserId) -> Result<Vec<Message>, StoreError>;
}
