use axum::{
    Json,
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::modules::achievements::core::events::{Achievement, Event};
use crate::modules::achievements::core::player::Player;
use crate::modules::achievements::errors::EngineError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct SubmitEventBody {
    pub name: String,
    #[serde(default)]
    pub payload: Option<Value>,
}

#[derive(Serialize)]
pub struct SubmitEventResponse {
    pub awarded: Vec<Achievement>,
}

fn error_response(err: EngineError) -> Response {
    match err {
        EngineError::UnsupportedRuleKind { .. } => {
            tracing::warn!(error = %err, "rule kind not supported");
            StatusCode::NOT_IMPLEMENTED.into_response()
        }
        EngineError::Store(_) => {
            tracing::error!(error = %err, "player store failure");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn register_player(
    State(state): State<AppState>,
    body: Result<Json<Player>, JsonRejection>,
) -> impl IntoResponse {
    let Json(player) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state.engine.add_player(&player).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn submit_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<SubmitEventBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    // Keep the caller fields of a registered player; unknown ids start out bare.
    let player = match state.engine.get_player(&Player::new(id.clone())).await {
        Ok(Some(known)) => known.player,
        Ok(None) => Player::new(id),
        Err(err) => return error_response(err),
    };
    let event = Event {
        name: body.name,
        payload: body.payload,
    };

    match state.engine.submit_event(&player, event).await {
        Ok(awarded) => (StatusCode::ACCEPTED, Json(SubmitEventResponse { awarded })).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn get_player(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.engine.get_player(&Player::new(id)).await {
        Ok(Some(game_player)) => Json(game_player).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn get_history(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.engine.get_player_history(&Player::new(id)).await {
        Ok(history) => Json(history).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn get_achievements(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.engine.get_player_achievements(&Player::new(id)).await {
        Ok(achievements) => Json(achievements).into_response(),
        Err(err) => error_response(err),
    }
}
