use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};
use std::sync::Arc;

use super::{respond, AppState};
use crate::api::models::{AdvanceResponse, RefreshResponse};
use crate::database::NewGameweekScore;

pub async fn post_score(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(score): Json<NewGameweekScore>,
) -> impl IntoResponse {
    respond(state, headers, move |state, identity| {
        state.scoring.record_score(identity, &score)
    })
    .await
}

pub async fn post_refresh_stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    respond(state, headers, |state, identity| {
        let players_refreshed = state.scoring.refresh_all_player_stats(identity)?;
        Ok(RefreshResponse { players_refreshed })
    })
    .await
}

pub async fn post_advance_gameweeks(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    respond(state, headers, |state, identity| {
        let transitions = state.gameweeks.advance_statuses(identity)?;
        Ok(AdvanceResponse { transitions })
    })
    .await
}
