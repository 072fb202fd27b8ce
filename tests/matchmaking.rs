//! Integration tests for the bookkeeping services (users, games, likes,
//! matches, messages) against the in-memory store.

#[allow(dead_code)]
mod common;

use meeplematch::models::{GamePatch, LikeStatus, MatchStatus, NewUser, UserPatch};
use meeplematch::services::{
    game_service, like_service, match_service, message_service, user_service,
};
use meeplematch::Error;

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_user_rejects_bad_email_and_blank_name() {
    let seeded = common::seed().await;

    let err = user_service::create_user(
        &seeded.store,
        NewUser {
            email: "not-an-email".to_string(),
            name: "Sam".to_string(),
        },
    )
    .await
    .expect_err("email without @");
    assert!(matches!(err, Error::Validation(_)));

    let err = user_service::create_user(
        &seeded.store,
        NewUser {
            email: "sam@example.com".to_string(),
            name: "   ".to_string(),
        },
    )
    .await
    .expect_err("blank name");
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn list_users_pages_newest_first_and_clamps_take() {
    let seeded = common::seed().await;

    let all = user_service::list_users(&seeded.store, 0, 50)
        .await
        .expect("list");
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].user_id, seeded.dmitry);
    assert_eq!(all[2].user_id, seeded.alex);

    // take=0 clamps to a single row; skip walks the same ordering.
    let clamped = user_service::list_users(&seeded.store, 0, 0)
        .await
        .expect("list");
    assert_eq!(clamped.len(), 1);
    let second = user_service::list_users(&seeded.store, 1, 1)
        .await
        .expect("list");
    assert_eq!(second[0].user_id, seeded.maria);
}

#[tokio::test]
async fn set_owned_games_requires_known_games_and_dedupes() {
    let seeded = common::seed().await;

    let err = user_service::set_owned_games(&seeded.store, seeded.alex, vec![seeded.uno, 424242])
        .await
        .expect_err("unknown game id");
    assert!(matches!(err, Error::GameNotFound(424242)));

    let user = user_service::set_owned_games(
        &seeded.store,
        seeded.alex,
        vec![seeded.uno, seeded.uno, seeded.mafia],
    )
    .await
    .expect("assign games");
    assert_eq!(user.owned_games, vec![seeded.uno, seeded.mafia]);
}

#[tokio::test]
async fn find_users_by_games_excludes_subject_and_empty_filter() {
    let seeded = common::seed().await;

    let owners = user_service::find_users_by_games(
        &seeded.store,
        &[seeded.monopoly],
        seeded.alex,
    )
    .await
    .expect("search");
    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0].user_id, seeded.dmitry);

    let none = user_service::find_users_by_games(&seeded.store, &[], seeded.alex)
        .await
        .expect("search");
    assert!(none.is_empty());
}

#[tokio::test]
async fn delete_user_then_lookup_fails() {
    let seeded = common::seed().await;

    user_service::delete_user(&seeded.store, seeded.dmitry)
        .await
        .expect("delete");
    let err = user_service::get_user(&seeded.store, seeded.dmitry)
        .await
        .expect_err("deleted");
    assert!(matches!(err, Error::UserNotFound(id) if id == seeded.dmitry));
}

// ---------------------------------------------------------------------------
// Games
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_game_validates_player_counts() {
    let seeded = common::seed().await;

    let err = game_service::create_game(&seeded.store, common::new_game("Solitaire", 0, 1, 15))
        .await
        .expect_err("min_players below 1");
    assert!(matches!(err, Error::Validation(_)));

    let err = game_service::create_game(&seeded.store, common::new_game("Backwards", 4, 2, 30))
        .await
        .expect_err("max below min");
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn update_game_patches_fields_and_bumps_updated_at() {
    let seeded = common::seed().await;
    let before = game_service::get_game(&seeded.store, seeded.uno)
        .await
        .expect("get");

    let after = game_service::update_game(
        &seeded.store,
        seeded.uno,
        GamePatch {
            duration_minutes: Some(20),
            ..Default::default()
        },
    )
    .await
    .expect("patch");

    assert_eq!(after.duration_minutes, 20);
    assert_eq!(after.name, before.name);
    assert!(after.updated_at >= before.updated_at);
}

#[tokio::test]
async fn delete_game_removes_it_from_owned_sets() {
    let seeded = common::seed().await;

    game_service::delete_game(&seeded.store, seeded.monopoly)
        .await
        .expect("delete");

    let alex = user_service::get_user(&seeded.store, seeded.alex)
        .await
        .expect("get");
    assert_eq!(alex.owned_games, vec![seeded.carcassonne]);

    let err = game_service::get_game(&seeded.store, seeded.monopoly)
        .await
        .expect_err("deleted");
    assert!(matches!(err, Error::GameNotFound(id) if id == seeded.monopoly));
}

// ---------------------------------------------------------------------------
// Likes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn set_like_upserts_status_for_the_pair() {
    let seeded = common::seed().await;

    let first = like_service::set_like(&seeded.store, seeded.alex, seeded.maria, LikeStatus::Like)
        .await
        .expect("like");
    let second =
        like_service::set_like(&seeded.store, seeded.alex, seeded.maria, LikeStatus::Dislike)
            .await
            .expect("re-like");

    assert_eq!(second.status, LikeStatus::Dislike);
    assert_eq!(second.created_at, first.created_at);

    let received = like_service::likes_received(&seeded.store, seeded.maria)
        .await
        .expect("received");
    assert!(received.is_empty(), "dislikes are not reported");
}

#[tokio::test]
async fn likes_received_reports_only_likes_newest_first() {
    let seeded = common::seed().await;

    like_service::set_like(&seeded.store, seeded.maria, seeded.alex, LikeStatus::Like)
        .await
        .expect("like");
    like_service::set_like(&seeded.store, seeded.dmitry, seeded.alex, LikeStatus::Like)
        .await
        .expect("like");

    let received = like_service::likes_received(&seeded.store, seeded.alex)
        .await
        .expect("received");
    assert_eq!(received.len(), 2);
    assert_eq!(received[0].sender_id, seeded.dmitry);
    assert_eq!(received[1].sender_id, seeded.maria);
}

#[tokio::test]
async fn mutual_like_needs_both_directions() {
    let seeded = common::seed().await;

    like_service::set_like(&seeded.store, seeded.alex, seeded.maria, LikeStatus::Like)
        .await
        .expect("like");
    assert!(!like_service::is_mutual_like(&seeded.store, seeded.alex, seeded.maria)
        .await
        .expect("check"));

    like_service::set_like(&seeded.store, seeded.maria, seeded.alex, LikeStatus::Like)
        .await
        .expect("like back");
    assert!(like_service::is_mutual_like(&seeded.store, seeded.alex, seeded.maria)
        .await
        .expect("check"));

    // A dislike in either direction breaks mutuality.
    like_service::set_like(&seeded.store, seeded.maria, seeded.alex, LikeStatus::Dislike)
        .await
        .expect("change of heart");
    assert!(!like_service::is_mutual_like(&seeded.store, seeded.alex, seeded.maria)
        .await
        .expect("check"));
}

#[tokio::test]
async fn like_endpoints_reject_unknown_users_and_missing_rows() {
    let seeded = common::seed().await;

    let err = like_service::set_like(&seeded.store, seeded.alex, 777, LikeStatus::Like)
        .await
        .expect_err("unknown receiver");
    assert!(matches!(err, Error::UserNotFound(777)));

    let err = like_service::remove_like(&seeded.store, seeded.alex, seeded.maria)
        .await
        .expect_err("nothing to remove");
    assert!(matches!(err, Error::LikeNotFound { .. }));
}

// ---------------------------------------------------------------------------
// Matches
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_match_starts_pending_and_rejects_duplicates() {
    let seeded = common::seed().await;

    let request = match_service::create_match(
        &seeded.store,
        seeded.alex,
        seeded.maria,
        Some("Monopoly on Saturday?".to_string()),
    )
    .await
    .expect("create");
    assert_eq!(request.status, MatchStatus::Pending);

    let err = match_service::create_match(&seeded.store, seeded.alex, seeded.maria, None)
        .await
        .expect_err("duplicate pair");
    assert!(matches!(err, Error::MatchAlreadyExists { .. }));

    // The reverse direction is a separate request.
    match_service::create_match(&seeded.store, seeded.maria, seeded.alex, None)
        .await
        .expect("reverse direction");
}

#[tokio::test]
async fn match_status_updates_flow_into_accepted_list() {
    let seeded = common::seed().await;

    match_service::create_match(&seeded.store, seeded.alex, seeded.maria, None)
        .await
        .expect("create");
    match_service::create_match(&seeded.store, seeded.dmitry, seeded.alex, None)
        .await
        .expect("create");

    let updated =
        match_service::update_match_status(&seeded.store, seeded.alex, seeded.maria, MatchStatus::Accepted)
            .await
            .expect("accept");
    assert_eq!(updated.status, MatchStatus::Accepted);
    assert!(updated.updated_at >= updated.created_at);

    let accepted = match_service::accepted_matches(&seeded.store, seeded.alex)
        .await
        .expect("accepted");
    assert_eq!(accepted.len(), 1);
    assert_eq!(accepted[0].receiver_id, seeded.maria);

    let all = match_service::user_matches(&seeded.store, seeded.alex)
        .await
        .expect("all");
    assert_eq!(all.len(), 2);
    // Most recently updated first: the accepted request was touched last.
    assert_eq!(all[0].receiver_id, seeded.maria);

    let err = match_service::update_match_status(
        &seeded.store,
        seeded.alex,
        seeded.dmitry,
        MatchStatus::Rejected,
    )
    .await
    .expect_err("no such direction");
    assert!(matches!(err, Error::MatchNotFound { .. }));
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn conversation_interleaves_both_directions_oldest_first() {
    let seeded = common::seed().await;

    message_service::send_message(&seeded.store, seeded.alex, seeded.maria, "Up for a game?")
        .await
        .expect("send");
    message_service::send_message(&seeded.store, seeded.maria, seeded.alex, "Always.")
        .await
        .expect("send");
    message_service::send_message(&seeded.store, seeded.alex, seeded.dmitry, "Unrelated")
        .await
        .expect("send");

    let thread = message_service::conversation(&seeded.store, seeded.alex, seeded.maria)
        .await
        .expect("thread");
    assert_eq!(thread.len(), 2);
    assert_eq!(thread[0].content, "Up for a game?");
    assert_eq!(thread[1].content, "Always.");
    assert!(thread[0].created_at <= thread[1].created_at);
}

#[tokio::test]
async fn send_message_rejects_blank_content_and_unknown_peers() {
    let seeded = common::seed().await;

    let err = message_service::send_message(&seeded.store, seeded.alex, seeded.maria, "   ")
        .await
        .expect_err("blank content");
    assert!(matches!(err, Error::Validation(_)));

    let err = message_service::send_message(&seeded.store, seeded.alex, 12345, "hello?")
        .await
        .expect_err("unknown receiver");
    assert!(matches!(err, Error::UserNotFound(12345)));
}

#[tokio::test]
async fn inbox_groups_by_peer_with_unread_counts() {
    let seeded = common::seed().await;

    message_service::send_message(&seeded.store, seeded.maria, seeded.alex, "hi")
        .await
        .expect("send");
    message_service::send_message(&seeded.store, seeded.maria, seeded.alex, "hi again")
        .await
        .expect("send");
    message_service::send_message(&seeded.store, seeded.alex, seeded.dmitry, "evening game?")
        .await
        .expect("send");

    let inbox = message_service::user_conversations(&seeded.store, seeded.alex)
        .await
        .expect("inbox");
    assert_eq!(inbox.len(), 2);

    // Newest conversation first: the Dmitry thread was touched last.
    assert_eq!(inbox[0].peer_id, seeded.dmitry);
    assert_eq!(inbox[0].unread_count, 0, "own outgoing message is not unread");
    assert_eq!(inbox[1].peer_id, seeded.maria);
    assert_eq!(inbox[1].unread_count, 2);
    assert_eq!(inbox[1].last_message.content, "hi again");
}

#[tokio::test]
async fn mark_read_clears_unread_and_reports_count() {
    let seeded = common::seed().await;

    message_service::send_message(&seeded.store, seeded.maria, seeded.alex, "one")
        .await
        .expect("send");
    message_service::send_message(&seeded.store, seeded.maria, seeded.alex, "two")
        .await
        .expect("send");

    let unread = message_service::unread_messages(&seeded.store, seeded.alex)
        .await
        .expect("unread");
    assert_eq!(unread.len(), 2);
    assert_eq!(unread[0].content, "two");

    let changed = message_service::mark_read(&seeded.store, seeded.maria, seeded.alex)
        .await
        .expect("mark read");
    assert_eq!(changed, 2);

    let unread = message_service::unread_messages(&seeded.store, seeded.alex)
        .await
        .expect("unread");
    assert!(unread.is_empty());

    // Second pass is a no-op.
    let changed = message_service::mark_read(&seeded.store, seeded.maria, seeded.alex)
        .await
        .expect("mark read");
    assert_eq!(changed, 0);
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_enums_serialize_to_their_wire_values() {
    assert_eq!(
        serde_json::to_value(LikeStatus::Like).expect("serialize"),
        serde_json::json!("LIKE")
    );
    assert_eq!(
        serde_json::to_value(LikeStatus::Dislike).expect("serialize"),
        serde_json::json!("DISLIKE")
    );
    assert_eq!(
        serde_json::to_value(MatchStatus::Pending).expect("serialize"),
        serde_json::json!("PENDING")
    );
    assert_eq!(
        serde_json::to_value(MatchStatus::Blocked).expect("serialize"),
        serde_json::json!("BLOCKED")
    );
    assert_eq!(
        serde_json::from_value::<MatchStatus>(serde_json::json!("ACCEPTED")).expect("parse"),
        MatchStatus::Accepted
    );
}
