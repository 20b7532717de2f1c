use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rules::{FantasyTeamId, PlayerId, StatusTransition};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransfersAllowedResponse {
    pub transfers_allowed: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamValueResponse {
    pub fantasy_team_id: FantasyTeamId,
    pub value: Decimal,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupRequest {
    pub starters: Vec<PlayerId>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub player_out: PlayerId,
    pub player_in: PlayerId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub players_refreshed: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceResponse {
    pub transitions: Vec<StatusTransition>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
