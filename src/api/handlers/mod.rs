use axum::{
    http::{header::AUTHORIZATION, HeaderMap},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::sync::Arc;

use crate::auth::Identity;
use crate::config::settings::AppConfig;
use crate::database::{self, DbPool};
use crate::errors::{AppError, AppResult};
use crate::services::{GameweekService, ScoringService, TeamService};

pub mod admin;
pub mod gameweeks;
pub mod leagues;
pub mod players;
pub mod teams;

pub struct AppState {
    pub pool: DbPool,
    pub config: AppConfig,
    pub gameweeks: GameweekService,
    pub scoring: ScoringService,
    pub teams: TeamService,
}

impl AppState {
    pub fn new(pool: DbPool, config: AppConfig) -> Self {
        Self {
            gameweeks: GameweekService::new(pool.clone()),
            scoring: ScoringService::new(pool.clone()),
            teams: TeamService::new(pool.clone(), config.formation.clone()),
            pool,
            config,
        }
    }
}

/// Maps the bearer token to an identity. No header means anonymous;
/// a token nobody owns is rejected outright.
pub fn resolve_identity(state: &AppState, headers: &HeaderMap) -> AppResult<Identity> {
    let Some(header) = headers.get(AUTHORIZATION) else {
        return Ok(Identity::Anonymous);
    };

    // The scheme name is case-insensitive.
    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.trim().split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized)?;

    if state.config.server.service_token.as_deref() == Some(token) {
        return Ok(Identity::Service);
    }

    let conn = database::get_connection(&state.pool)?;
    match database::users::find_by_api_token(&conn, token)? {
        Some(user) => Ok(Identity::User {
            user_id: user.id,
            role: user.role,
        }),
        None => Err(AppError::Unauthorized),
    }
}

/// Resolves the caller and runs a blocking store operation off the async runtime.
pub async fn respond<T, F>(state: Arc<AppState>, headers: HeaderMap, operation: F) -> Response
where
    T: Serialize + Send + 'static,
    F: FnOnce(&AppState, &Identity) -> AppResult<T> + Send + 'static,
{
    let outcome = tokio::task::spawn_blocking(move || {
        let identity = resolve_identity(&state, &headers)?;
        operation(&state, &identity)
    })
    .await;

    match outcome {
        Ok(Ok(body)) => Json(body).into_response(),
        Ok(Err(err)) => err.into_response(),
        Err(join_error) => {
            AppError::Internal(anyhow::anyhow!("Handler task failed: {}", join_error)).into_response()
        }
    }
}
