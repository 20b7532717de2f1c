use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Type, ValueRef};
use rusqlite::Row;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::auth::{Role, UserId};
use crate::rules::{
    gameweek::GameweekState, FantasyTeamId, GameweekNumber, GameweekStats, GameweekStatus,
    MatchStatus, PlayerId, Position,
};

macro_rules! text_column {
    ($ty:ty) => {
        impl ToSql for $ty {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $ty {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                value
                    .as_str()?
                    .parse()
                    .map_err(|e: String| FromSqlError::Other(e.into()))
            }
        }
    };
}

text_column!(Position);
text_column!(GameweekStatus);
text_column!(MatchStatus);
text_column!(Role);

/// Prices are stored as decimal text so no precision is lost.
pub(crate) fn decimal_column(row: &Row, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: Option<String>,
    pub role: Role,
    pub api_token: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub short_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub team_id: Option<i64>,
    pub position: Position,
    pub price: Decimal,
    pub total_points: i32,
    pub games_played: i32,
    pub goals_scored: i32,
    pub assists: i32,
    pub clean_sheets: i32,
    pub yellow_cards: i32,
    pub red_cards: i32,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct League {
    pub id: i64,
    pub name: String,
    pub created_by: Option<UserId>,
}

#[derive(Debug, Clone)]
pub struct Gameweek {
    pub number: GameweekNumber,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub status: GameweekStatus,
}

impl Gameweek {
    pub fn state(&self) -> GameweekState {
        GameweekState {
            number: self.number,
            status: self.status,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RealMatch {
    pub id: i64,
    pub gameweek: GameweekNumber,
    pub home_team_id: Option<i64>,
    pub away_team_id: Option<i64>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub kickoff: Option<NaiveDateTime>,
    pub status: MatchStatus,
}

#[derive(Debug, Clone)]
pub struct FantasyTeam {
    pub id: FantasyTeamId,
    pub user_id: UserId,
    pub league_id: Option<i64>,
    pub name: String,
    pub total_points: i32,
    pub rank: Option<i32>,
    pub gameweek_points: i32,
}

#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub id: i64,
    pub fantasy_team_id: FantasyTeamId,
    pub player_id: PlayerId,
    pub is_starter: bool,
}

// DTOs for joined queries
#[derive(Debug, Clone)]
pub struct RosterPlayer {
    pub player_id: PlayerId,
    pub position: Position,
    pub price: Decimal,
    pub is_starter: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameweekScore {
    pub id: i64,
    pub player_id: PlayerId,
    pub gameweek: GameweekNumber,
    pub stats: GameweekStats,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGameweekScore {
    pub player_id: PlayerId,
    pub gameweek: GameweekNumber,
    #[serde(flatten)]
    pub stats: GameweekStats,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingRow {
    pub fantasy_team_id: FantasyTeamId,
    pub team_name: String,
    pub username: String,
    pub total_points: i32,
    pub rank: Option<i32>,
    pub gameweek_points: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecord {
    pub id: i64,
    pub fantasy_team_id: FantasyTeamId,
    pub player_in_id: PlayerId,
    pub player_out_id: PlayerId,
    pub gameweek: Option<GameweekNumber>,
    pub created_at: Option<NaiveDateTime>,
}
