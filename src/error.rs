use crate::models::{GameId, UserId};
use crate::storage::StoreError;

/// Domain errors surfaced to the request layer. All of these are
/// deterministic input errors: no retry, no partial results.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("latitude must be within [-90, 90] and longitude within [-180, 180]")]
    InvalidCoordinates,

    #[error("location not set for user {0}")]
    LocationNotSet(UserId),

    #[error("radius must be a non-negative number of kilometers")]
    InvalidRadius,

    #[error("user not found: {0}")]
    UserNotFound(UserId),

    #[error("game not found: {0}")]
    GameNotFound(GameId),

    #[error("no like from user {sender_id} to user {receiver_id}")]
    LikeNotFound { sender_id: UserId, receiver_id: UserId },

    #[error("no match request from user {sender_id} to user {receiver_id}")]
    MatchNotFound { sender_id: UserId, receiver_id: UserId },

    #[error("match request from user {sender_id} to user {receiver_id} already exists")]
    MatchAlreadyExists { sender_id: UserId, receiver_id: UserId },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, Error>;
