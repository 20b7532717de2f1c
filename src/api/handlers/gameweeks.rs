use axum::{extract::State, http::HeaderMap, response::IntoResponse};
use std::sync::Arc;

use super::{respond, AppState};
use crate::api::models::TransfersAllowedResponse;

pub async fn get_transfers_allowed(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    respond(state, headers, |state, identity| {
        let transfers_allowed = state.gameweeks.transfers_allowed(identity)?;
        Ok(TransfersAllowedResponse { transfers_allowed })
    })
    .await
}
