pub mod game_service;
pub mod geolocation_service;
pub mod like_service;
pub mod match_service;
pub mod message_service;
pub mod user_service;
