use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
};
use std::sync::Arc;

use super::{respond, AppState};

pub async fn get_league_standings(
    State(state): State<Arc<AppState>>,
    Path(league_id): Path<i64>,
    headers: HeaderMap,
) -> impl IntoResponse {
    respond(state, headers, move |state, identity| {
        state.teams.league_standings(identity, league_id)
    })
    .await
}
