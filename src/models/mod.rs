pub mod games;
pub mod geo;
pub mod likes;
pub mod matches;
pub mod messages;
pub mod users;

pub use games::{Game, GamePatch, NewGame};
pub use geo::{Candidate, GeoPoint, ProximityResult};
pub use likes::{Like, LikeStatus};
pub use matches::{MatchRequest, MatchStatus};
pub use messages::{Conversation, Message};
pub use users::{NewUser, Profile, User, UserPatch};

/// Ids are allocated by the backing store (auto-increment in a
/// relational backend, per-instance counters in the in-memory one),
/// never by process-wide state.
pub type UserId = i64;
pub type GameId = i64;
pub type MessageId = i64;
