use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::achievements::adapters::inbound::http as players_http;
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/players", post(players_http::register_player))
        .route("/players/{id}", get(players_http::get_player))
        .route("/players/{id}/events", post(players_http::submit_event))
        .route("/players/{id}/history", get(players_http::get_history))
        .route("/players/{id}/achievements", get(players_http::get_achievements))
        .with_state(state)
}
