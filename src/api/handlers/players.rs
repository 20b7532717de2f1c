use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
};
use std::sync::Arc;

use super::{respond, AppState};
use crate::rules::{GameweekNumber, PlayerId};

pub async fn get_player_gameweek_stats(
    State(state): State<Arc<AppState>>,
    Path((player_id, gameweek)): Path<(PlayerId, GameweekNumber)>,
    headers: HeaderMap,
) -> impl IntoResponse {
    respond(state, headers, move |state, identity| {
        state.scoring.player_gameweek_stats(identity, player_id, gameweek)
    })
    .await
}
