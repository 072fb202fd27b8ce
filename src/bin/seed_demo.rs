use std::collections::HashSet;
use std::env;

use dotenvy::dotenv;

use meeplematch::models::{NewGame, NewUser, Profile};
use meeplematch::services::geolocation_service::{self, NearestQuery, RadiusQuery};
use meeplematch::services::{game_service, user_service};
use meeplematch::storage::MemoryStore;
use meeplematch::Result;

/// Seeds an in-memory store with the demo fixtures (two Moscow players,
/// one in Saint Petersburg, five games) and runs each proximity query
/// against it.
#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let radius_km: f64 = env::var("DEMO_RADIUS_KM")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(1000.0);

    if let Err(e) = run(radius_km).await {
        eprintln!("seed demo failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(radius_km: f64) -> Result<()> {
    let store = MemoryStore::new();

    let games = [
        ("Monopoly", 2, 6, 120, "Strategy"),
        ("Carcassonne", 2, 5, 60, "Strategy"),
        ("Uno", 2, 10, 30, "Card"),
        ("Timeline", 2, 8, 30, "Trivia"),
        ("Mafia", 6, 20, 45, "Party"),
    ];
    let mut game_ids = Vec::new();
    for (name, min_players, max_players, duration_minutes, category) in games {
        let game = game_service::create_game(
            &store,
            NewGame {
                name: name.to_string(),
                description: None,
                min_players,
                max_players,
                duration_minutes,
                category: Some(category.to_string()),
            },
        )
        .await?;
        game_ids.push(game.game_id);
    }

    let fixtures = [
        (
            "alex@example.com",
            "Alex",
            "Into strategy and card games",
            28,
            "Moscow",
            (55.7558, 37.6173),
            vec![game_ids[0], game_ids[1]],
        ),
        (
            "maria@example.com",
            "Maria",
            "Board game lover, party games above all",
            25,
            "Saint Petersburg",
            (59.9343, 30.3351),
            vec![game_ids[2], game_ids[4]],
        ),
        (
            "dmitry@example.com",
            "Dmitry",
            "New to board games, looking for company",
            30,
            "Moscow",
            (55.7520, 37.6156),
            vec![game_ids[0], game_ids[3]],
        ),
    ];

    let mut user_ids = Vec::new();
    for (email, name, bio, age, city, (lat, lon), owned) in fixtures {
        let user = user_service::create_user(
            &store,
            NewUser {
                email: email.to_string(),
                name: name.to_string(),
            },
        )
        .await?;
        store.insert_profile(Profile {
            user_id: user.user_id,
            bio: Some(bio.to_string()),
            age: Some(age),
            city: Some(city.to_string()),
            location: None,
        });
        geolocation_service::update_location(&store, user.user_id, lat, lon).await?;
        user_service::set_owned_games(&store, user.user_id, owned).await?;
        user_ids.push(user.user_id);
    }

    let alex = user_ids[0];
    let maria = user_ids[1];

    let within = geolocation_service::find_users_in_radius(
        &store,
        alex,
        &RadiusQuery {
            radius_km,
            ..Default::default()
        },
    )
    .await?;
    println!(
        "users within {} km of Alex:\n{}",
        radius_km,
        serde_json::to_string_pretty(&within).expect("serialize results")
    );

    let nearest = geolocation_service::find_nearest_users(
        &store,
        alex,
        &NearestQuery {
            limit: 2,
            game_ids: Some(HashSet::from([game_ids[4]])),
        },
    )
    .await?;
    println!(
        "nearest Mafia owners to Alex:\n{}",
        serde_json::to_string_pretty(&nearest).expect("serialize results")
    );

    let km = geolocation_service::distance_between_users(&store, alex, maria).await?;
    println!("Alex and Maria are {} km apart", km);

    Ok(())
}
