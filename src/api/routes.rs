use axum::{
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    admin::{post_advance_gameweeks, post_refresh_stats, post_score},
    gameweeks::get_transfers_allowed,
    leagues::get_league_standings,
    players::get_player_gameweek_stats,
    teams::{get_team_formation, get_team_transfers, get_team_value, post_team_transfer, put_team_lineup},
    AppState,
};
use crate::api::models::HealthResponse;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(|| async { Json(HealthResponse { status: "ok" }) }))
        .route("/api/gameweeks/transfers-allowed", get(get_transfers_allowed))
        .route("/api/players/:id/gameweeks/:gameweek", get(get_player_gameweek_stats))
        .route("/api/teams/:id/value", get(get_team_value))
        .route("/api/teams/:id/formation", get(get_team_formation))
        .route("/api/teams/:id/lineup", put(put_team_lineup))
        .route("/api/teams/:id/transfers", get(get_team_transfers).post(post_team_transfer))
        .route("/api/leagues/:id/standings", get(get_league_standings))
        .route("/api/admin/scores", post(post_score))
        .route("/api/admin/players/refresh-stats", post(post_refresh_stats))
        .route("/api/admin/gameweeks/advance", post(post_advance_gameweeks))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::settings::AppConfig;
    use crate::database::fixtures::{add_lineup, test_pool, test_team};
    use crate::database::{self, players};
    use crate::rules::Position;
    use rust_decimal_macros::dec;

    const SERVICE_TOKEN: &str = "service-secret";

    fn test_state() -> Arc<AppState> {
        let mut config = AppConfig::new();
        config.server.service_token = Some(SERVICE_TOKEN.to_string());
        Arc::new(AppState::new(test_pool(), config))
    }

    async fn send(state: &Arc<AppState>, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = create_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health_needs_no_identity() {
        let state = test_state();
        let (status, body) = send(&state, "GET", "/api/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_anonymous_requests_are_unauthorized() {
        let state = test_state();
        let (status, _) = send(&state, "GET", "/api/gameweeks/transfers-allowed", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&state, "GET", "/api/gameweeks/transfers-allowed", Some("bogus"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_bearer_scheme_ignores_case() {
        let state = test_state();
        for header_value in [format!("bearer {}", SERVICE_TOKEN), format!("BEARER  {}", SERVICE_TOKEN)] {
            let request = Request::builder()
                .uri("/api/gameweeks/transfers-allowed")
                .header(header::AUTHORIZATION, header_value)
                .body(Body::empty())
                .unwrap();
            let response = create_router(state.clone()).oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let request = Request::builder()
            .uri("/api/gameweeks/transfers-allowed")
            .header(header::AUTHORIZATION, format!("Basic {}", SERVICE_TOKEN))
            .body(Body::empty())
            .unwrap();
        let response = create_router(state.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_transfers_allowed_without_gameweeks() {
        let state = test_state();
        let (status, body) = send(&state, "GET", "/api/gameweeks/transfers-allowed", Some(SERVICE_TOKEN), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["transfersAllowed"], true);
    }

    #[tokio::test]
    async fn test_owner_reads_formation_and_value() {
        let state = test_state();
        let team = {
            let conn = database::get_connection(&state.pool).unwrap();
            let team = test_team(&conn, "owner");
            add_lineup(&conn, team.id, 1, 4, 4, 2);
            team
        };

        let uri = format!("/api/teams/{}/formation", team.id);
        let (status, body) = send(&state, "GET", &uri, Some("token-owner"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["formation"], "4-4-2");
        assert_eq!(body["valid"], true);

        let uri = format!("/api/teams/{}/value", team.id);
        let (status, body) = send(&state, "GET", &uri, Some("token-owner"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["value"], "55.0");
    }

    #[tokio::test]
    async fn test_other_users_teams_read_as_missing() {
        let state = test_state();
        let team = {
            let conn = database::get_connection(&state.pool).unwrap();
            test_team(&conn, "stranger");
            test_team(&conn, "owner")
        };

        let uri = format!("/api/teams/{}/formation", team.id);
        let (status, _) = send(&state, "GET", &uri, Some("token-stranger"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let uri = format!("/api/teams/{}/formation", team.id + 100);
        let (status, _) = send(&state, "GET", &uri, Some("token-stranger"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_score_write_updates_player_totals() {
        let state = test_state();
        let player = {
            let conn = database::get_connection(&state.pool).unwrap();
            players::insert_player(&conn, "Forward", None, Position::Forward, dec!(8.0)).unwrap()
        };

        let body = json!({ "playerId": player.id, "gameweek": 1, "minutesPlayed": 90, "goals": 2, "totalPoints": 12 });
        let (status, stored) = send(&state, "POST", "/api/admin/scores", Some(SERVICE_TOKEN), Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stored["stats"]["totalPoints"], 12);

        let uri = format!("/api/players/{}/gameweeks/1", player.id);
        let (status, stats) = send(&state, "GET", &uri, Some(SERVICE_TOKEN), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["goals"], 2);

        let conn = database::get_connection(&state.pool).unwrap();
        let loaded = players::find_by_id(&conn, player.id).unwrap().unwrap();
        assert_eq!(loaded.total_points, 12);
    }

    #[tokio::test]
    async fn test_plain_users_cannot_run_batch_jobs() {
        let state = test_state();
        {
            let conn = database::get_connection(&state.pool).unwrap();
            test_team(&conn, "player");
        }

        let (status, _) = send(&state, "POST", "/api/admin/gameweeks/advance", Some("token-player"), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(&state, "POST", "/api/admin/players/refresh-stats", Some(SERVICE_TOKEN), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["playersRefreshed"], 0);
    }

    #[tokio::test]
    async fn test_invalid_lineup_is_unprocessable() {
        let state = test_state();
        let (team, ids) = {
            let conn = database::get_connection(&state.pool).unwrap();
            let team = test_team(&conn, "owner");
            let ids = add_lineup(&conn, team.id, 1, 4, 4, 2);
            (team, ids)
        };

        let uri = format!("/api/teams/{}/lineup", team.id);
        let body = json!({ "starters": &ids[..9] });
        let (status, _) = send(&state, "PUT", &uri, Some("token-owner"), Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_missing_league_is_not_found() {
        let state = test_state();
        let (status, body) = send(&state, "GET", "/api/leagues/7/standings", Some(SERVICE_TOKEN), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "league 7 not found");
    }
}
