// Shared test fixtures for players and timestamps.

use crate::modules::achievements::core::player::{GamePlayer, Player};
use crate::shared::core::primitives::Timestamp;
use chrono::DateTime;

pub fn make_player(id: &str) -> Player {
    Player::new(id).with_field("nickname", format!("player {id}"))
}

pub fn make_game_player(id: &str) -> GamePlayer {
    GamePlayer::new(make_player(id))
}

pub fn timestamp(millis: i64) -> Timestamp {
    DateTime::from_timestamp_millis(millis).expect("timestamp within range")
}
