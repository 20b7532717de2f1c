use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use super::{respond, AppState};
use crate::api::models::{LineupRequest, TeamValueResponse, TransferRequest};
use crate::rules::FantasyTeamId;

pub async fn get_team_value(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<FantasyTeamId>,
    headers: HeaderMap,
) -> impl IntoResponse {
    respond(state, headers, move |state, identity| {
        let value = state.teams.team_value(identity, team_id)?;
        Ok(TeamValueResponse {
            fantasy_team_id: team_id,
            value,
        })
    })
    .await
}

pub async fn get_team_formation(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<FantasyTeamId>,
    headers: HeaderMap,
) -> impl IntoResponse {
    respond(state, headers, move |state, identity| {
        state.teams.formation_report(identity, team_id)
    })
    .await
}

pub async fn put_team_lineup(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<FantasyTeamId>,
    headers: HeaderMap,
    Json(request): Json<LineupRequest>,
) -> impl IntoResponse {
    respond(state, headers, move |state, identity| {
        state.teams.submit_lineup(identity, team_id, &request.starters)
    })
    .await
}

pub async fn post_team_transfer(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<FantasyTeamId>,
    headers: HeaderMap,
    Json(request): Json<TransferRequest>,
) -> impl IntoResponse {
    respond(state, headers, move |state, identity| {
        state
            .teams
            .make_transfer(identity, team_id, request.player_out, request.player_in)
    })
    .await
}

pub async fn get_team_transfers(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<FantasyTeamId>,
    headers: HeaderMap,
) -> impl IntoResponse {
    respond(state, headers, move |state, identity| {
        state.teams.transfer_history(identity, team_id)
    })
    .await
}
