//! Domain core for a board-game matchmaking app: geolocation-based
//! player discovery plus the user/game/like/match/message bookkeeping
//! around it. Persistence stays behind the traits in [`storage`]; the
//! surrounding request layer fetches nothing itself and serializes the
//! plain structs these services return.

pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{Error, Result};
