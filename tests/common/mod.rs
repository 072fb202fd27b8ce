use meeplematch::models::{GameId, NewGame, NewUser, UserId};
use meeplematch::services::{game_service, geolocation_service, user_service};
use meeplematch::storage::MemoryStore;

/// Store seeded with the demo fixtures: Alex and Dmitry a short walk
/// apart in Moscow, Maria in Saint Petersburg, five games split between
/// them.
pub struct Seeded {
    pub store: MemoryStore,
    pub alex: UserId,
    pub maria: UserId,
    pub dmitry: UserId,
    pub monopoly: GameId,
    pub carcassonne: GameId,
    pub uno: GameId,
    pub timeline: GameId,
    pub mafia: GameId,
}

pub fn new_game(name: &str, min_players: i64, max_players: i64, duration_minutes: i64) -> NewGame {
    NewGame {
        name: name.to_string(),
        description: None,
        min_players,
        max_players,
        duration_minutes,
        category: None,
    }
}

pub async fn new_user(store: &MemoryStore, email: &str, name: &str) -> UserId {
    user_service::create_user(
        store,
        NewUser {
            email: email.to_string(),
            name: name.to_string(),
        },
    )
    .await
    .expect("create user")
    .user_id
}

pub async fn seed() -> Seeded {
    let store = MemoryStore::new();

    let monopoly = game_service::create_game(&store, new_game("Monopoly", 2, 6, 120))
        .await
        .expect("create game")
        .game_id;
    let carcassonne = game_service::create_game(&store, new_game("Carcassonne", 2, 5, 60))
        .await
        .expect("create game")
        .game_id;
    let uno = game_service::create_game(&store, new_game("Uno", 2, 10, 30))
        .await
        .expect("create game")
        .game_id;
    let timeline = game_service::create_game(&store, new_game("Timeline", 2, 8, 30))
        .await
        .expect("create game")
        .game_id;
    let mafia = game_service::create_game(&store, new_game("Mafia", 6, 20, 45))
        .await
        .expect("create game")
        .game_id;

    let alex = new_user(&store, "alex@example.com", "Alex").await;
    let maria = new_user(&store, "maria@example.com", "Maria").await;
    let dmitry = new_user(&store, "dmitry@example.com", "Dmitry").await;

    geolocation_service::update_location(&store, alex, 55.7558, 37.6173)
        .await
        .expect("set location");
    geolocation_service::update_location(&store, maria, 59.9343, 30.3351)
        .await
        .expect("set location");
    geolocation_service::update_location(&store, dmitry, 55.7520, 37.6156)
        .await
        .expect("set location");

    user_service::set_owned_games(&store, alex, vec![monopoly, carcassonne])
        .await
        .expect("assign games");
    user_service::set_owned_games(&store, maria, vec![uno, mafia])
        .await
        .expect("assign games");
    user_service::set_owned_games(&store, dmitry, vec![monopoly, timeline])
        .await
        .expect("assign games");

    Seeded {
        store,
        alex,
        maria,
        dmitry,
        monopoly,
        carcassonne,
        uno,
        timeline,
        mafia,
    }
}
