use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use crate::models::{
    Candidate, Game, GameId, GamePatch, GeoPoint, Like, LikeStatus, MatchRequest, MatchStatus,
    Message, MessageId, NewGame, NewUser, Profile, User, UserId, UserPatch,
};

use super::{
    GameStore, LikeStore, MatchStore, MessageStore, ProfileStore, StoreError, UserStore,
};

/// In-memory store for tests and the demo seeder.
///
/// All tables live behind one mutex per store instance, and so do the id
/// counters, so two stores never share allocation state.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: BTreeMap<UserId, User>,
    profiles: BTreeMap<UserId, Profile>,
    games: BTreeMap<GameId, Game>,
    likes: HashMap<(UserId, UserId), Like>,
    matches: HashMap<(UserId, UserId), MatchRequest>,
    messages: Vec<Message>,
    next_user_id: UserId,
    next_game_id: GameId,
    next_message_id: MessageId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a full profile row. A relational backend grows
    /// such rows through its own profile endpoints; tests and the demo
    /// seeder use this to set bios and cities directly.
    pub fn insert_profile(&self, profile: Profile) {
        self.inner.lock().profiles.insert(profile.user_id, profile);
    }
}

fn alloc(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, StoreError> {
        Ok(self.inner.lock().profiles.get(&user_id).cloned())
    }

    async fn upsert_location(
        &self,
        user_id: UserId,
        location: GeoPoint,
    ) -> Result<Profile, StoreError> {
        let mut inner = self.inner.lock();
        let profile = inner
            .profiles
            .entry(user_id)
            .or_insert_with(|| Profile::empty(user_id));
        profile.location = Some(location);
        Ok(profile.clone())
    }

    async fn list_candidates(
        &self,
        exclude_user_id: UserId,
    ) -> Result<Vec<Candidate>, StoreError> {
        let inner = self.inner.lock();
        Ok(inner
            .profiles
            .values()
            .filter(|p| p.user_id != exclude_user_id && p.location.is_some())
            .filter_map(|p| {
                let user = inner.users.get(&p.user_id)?;
                user.is_active.then(|| Candidate {
                    user_id: p.user_id,
                    location: p.location,
                    game_ids: user.owned_games.clone(),
                })
            })
            .collect())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get_user(&self, user_id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.inner.lock().users.get(&user_id).cloned())
    }

    async fn list_users(&self, skip: usize, take: usize) -> Result<Vec<User>, StoreError> {
        let inner = self.inner.lock();
        let mut users: Vec<User> = inner.users.values().cloned().collect();
        users.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.user_id.cmp(&a.user_id))
        });
        Ok(users.into_iter().skip(skip).take(take).collect())
    }

    async fn insert_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.lock();
        let user_id = alloc(&mut inner.next_user_id);
        let user = User {
            user_id,
            email: new_user.email,
            name: new_user.name,
            is_active: true,
            owned_games: Vec::new(),
            created_at: Utc::now(),
        };
        inner.users.insert(user_id, user.clone());
        Ok(user)
    }

    async fn update_user(
        &self,
        user_id: UserId,
        patch: UserPatch,
    ) -> Result<Option<User>, StoreError> {
        let mut inner = self.inner.lock();
        let Some(user) = inner.users.get_mut(&user_id) else {
            return Ok(None);
        };
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(is_active) = patch.is_active {
            user.is_active = is_active;
        }
        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, user_id: UserId) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock();
        if inner.users.remove(&user_id).is_none() {
            return Ok(false);
        }
        inner.profiles.remove(&user_id);
        inner
            .likes
            .retain(|_, l| l.sender_id != user_id && l.receiver_id != user_id);
        inner
            .matches
            .retain(|_, m| m.sender_id != user_id && m.receiver_id != user_id);
        inner
            .messages
            .retain(|m| m.sender_id != user_id && m.receiver_id != user_id);
        Ok(true)
    }

    async fn set_owned_games(
        &self,
        user_id: UserId,
        game_ids: Vec<GameId>,
    ) -> Result<Option<User>, StoreError> {
        let mut inner = self.inner.lock();
        let Some(user) = inner.users.get_mut(&user_id) else {
            return Ok(None);
        };
        user.owned_games = game_ids;
        Ok(Some(user.clone()))
    }

    async fn list_users_owning(
        &self,
        game_ids: &[GameId],
        exclude_user_id: UserId,
    ) -> Result<Vec<User>, StoreError> {
        let inner = self.inner.lock();
        Ok(inner
            .users
            .values()
            .filter(|u| u.user_id != exclude_user_id && u.is_active)
            .filter(|u| u.owned_games.iter().any(|g| game_ids.contains(g)))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn get_game(&self, game_id: GameId) -> Result<Option<Game>, StoreError> {
        Ok(self.inner.lock().games.get(&game_id).cloned())
    }

    async fn list_games(&self) -> Result<Vec<Game>, StoreError> {
        Ok(self.inner.lock().games.values().cloned().collect())
    }

    async fn insert_game(&self, new_game: NewGame) -> Result<Game, StoreError> {
        let mut inner = self.inner.lock();
        let game_id = alloc(&mut inner.next_game_id);
        let now = Utc::now();
        let game = Game {
            game_id,
            name: new_game.name,
            description: new_game.description,
            min_players: new_game.min_players,
            max_players: new_game.max_players,
            duration_minutes: new_game.duration_minutes,
            category: new_game.category,
            created_at: now,
            updated_at: now,
        };
        inner.games.insert(game_id, game.clone());
        Ok(game)
    }

    async fn update_game(
        &self,
        game_id: GameId,
        patch: GamePatch,
    ) -> Result<Option<Game>, StoreError> {
        let mut inner = self.inner.lock();
        let Some(game) = inner.games.get_mut(&game_id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            game.name = name;
        }
        if let Some(description) = patch.description {
            game.description = Some(description);
        }
        if let Some(min_players) = patch.min_players {
            game.min_players = min_players;
        }
        if let Some(max_players) = patch.max_players {
            game.max_players = max_players;
        }
        if let Some(duration_minutes) = patch.duration_minutes {
            game.duration_minutes = duration_minutes;
        }
        if let Some(category) = patch.category {
            game.category = Some(category);
        }
        game.updated_at = Utc::now();
        Ok(Some(game.clone()))
    }

    async fn delete_game(&self, game_id: GameId) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock();
        if inner.games.remove(&game_id).is_none() {
            return Ok(false);
        }
        for user in inner.users.values_mut() {
            user.owned_games.retain(|g| *g != game_id);
        }
        Ok(true)
    }
}

#[async_trait]
impl LikeStore for MemoryStore {
    async fn get_like(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
    ) -> Result<Option<Like>, StoreError> {
        Ok(self.inner.lock().likes.get(&(sender_id, receiver_id)).cloned())
    }

    async fn upsert_like(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
        status: LikeStatus,
    ) -> Result<Like, StoreError> {
        let mut inner = self.inner.lock();
        let like = inner
            .likes
            .entry((sender_id, receiver_id))
            .and_modify(|l| l.status = status)
            .or_insert_with(|| Like {
                sender_id,
                receiver_id,
                status,
                created_at: Utc::now(),
            });
        Ok(like.clone())
    }

    async fn list_likes_received(&self, receiver_id: UserId) -> Result<Vec<Like>, StoreError> {
        Ok(self
            .inner
            .lock()
            .likes
            .values()
            .filter(|l| l.receiver_id == receiver_id)
            .cloned()
            .collect())
    }

    async fn delete_like(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
    ) -> Result<bool, StoreError> {
        Ok(self
            .inner
            .lock()
            .likes
            .remove(&(sender_id, receiver_id))
            .is_some())
    }
}

#[async_trait]
impl MatchStore for MemoryStore {
    async fn get_match(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
    ) -> Result<Option<MatchRequest>, StoreError> {
        Ok(self
            .inner
            .lock()
            .matches
            .get(&(sender_id, receiver_id))
            .cloned())
    }

    async fn insert_match(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
        message: Option<String>,
    ) -> Result<MatchRequest, StoreError> {
        let now = Utc::now();
        let request = MatchRequest {
            sender_id,
            receiver_id,
            message,
            status: MatchStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.inner
            .lock()
            .matches
            .insert((sender_id, receiver_id), request.clone());
        Ok(request)
    }

    async fn update_match_status(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
        status: MatchStatus,
    ) -> Result<Option<MatchRequest>, StoreError> {
        let mut inner = self.inner.lock();
        let Some(request) = inner.matches.get_mut(&(sender_id, receiver_id)) else {
            return Ok(None);
        };
        request.status = status;
        request.updated_at = Utc::now();
        Ok(Some(request.clone()))
    }

    async fn list_matches_for(&self, user_id: UserId) -> Result<Vec<MatchRequest>, StoreError> {
        Ok(self
            .inner
            .lock()
            .matches
            .values()
            .filter(|m| m.sender_id == user_id || m.receiver_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn insert_message(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
        content: String,
    ) -> Result<Message, StoreError> {
        let mut inner = self.inner.lock();
        let message_id = alloc(&mut inner.next_message_id);
        let message = Message {
            message_id,
            sender_id,
            receiver_id,
            content,
            is_read: false,
            created_at: Utc::now(),
        };
        inner.messages.push(message.clone());
        Ok(message)
    }

    async fn list_between(
        &self,
        user_a: UserId,
        user_b: UserId,
    ) -> Result<Vec<Message>, StoreError> {
        Ok(self
            .inner
            .lock()
            .messages
            .iter()
            .filter(|m| {
                (m.sender_id == user_a && m.receiver_id == user_b)
                    || (m.sender_id == user_b && m.receiver_id == user_a)
            })
            .cloned()
            .collect())
    }

    async fn list_for(&self, user_id: UserId) -> Result<Vec<Message>, StoreError> {
        Ok(self
            .inner
            .lock()
            .messages
            .iter()
            .filter(|m| m.sender_id == user_id || m.receiver_id == user_id)
            .cloned()
            .collect())
    }

    async fn mark_read(&self, sender_id: UserId, receiver_id: UserId) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock();
        let mut changed = 0;
        for message in inner
            .messages
            .iter_mut()
            .filter(|m| m.sender_id == sender_id && m.receiver_id == receiver_id && !m.is_read)
        {
            message.is_read = true;
            changed += 1;
        }
        Ok(changed)
    }

    async fn list_unread(&self, receiver_id: UserId) -> Result<Vec<Message>, StoreError> {
        Ok(self
            .inner
            .lock()
            .messages
            .iter()
            .filter(|m| m.receiver_id == receiver_id && !m.is_read)
            .cloned()
            .collect())
    }
}
