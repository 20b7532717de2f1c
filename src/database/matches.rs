use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use super::models::RealMatch;
use crate::rules::{GameweekNumber, MatchStatus, MatchTally};

const MATCH_COLUMNS: &str = "id, gameweek, home_team_id, away_team_id, home_score, away_score, kickoff, status";

pub fn insert_match(
    conn: &Connection,
    gameweek: GameweekNumber,
    home_team_id: Option<i64>,
    away_team_id: Option<i64>,
    kickoff: Option<NaiveDateTime>,
) -> Result<RealMatch> {
    let sql = format!(
        "INSERT INTO real_matches (gameweek, home_team_id, away_team_id, kickoff) VALUES (?1, ?2, ?3, ?4) RETURNING {}",
        MATCH_COLUMNS
    );

    conn.query_row(
        &sql,
        params![gameweek, home_team_id, away_team_id, kickoff],
        parse_match_row,
    )
    .context("Failed to insert match")
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<RealMatch> {
    Ok(RealMatch {
        id: row.get(0)?,
        gameweek: row.get(1)?,
        home_team_id: row.get(2)?,
        away_team_id: row.get(3)?,
        home_score: row.get(4)?,
        away_score: row.get(5)?,
        kickoff: row.get(6)?,
        status: row.get(7)?,
    })
}

pub fn update_result(
    conn: &Connection,
    id: i64,
    status: MatchStatus,
    home_score: Option<i32>,
    away_score: Option<i32>,
) -> Result<()> {
    conn.execute(
        "UPDATE real_matches SET status = ?1, home_score = ?2, away_score = ?3 WHERE id = ?4",
        params![status, home_score, away_score, id],
    )
    .context("Failed to update match result")
    .map(|_| ())
}

pub fn tally_for_gameweek(conn: &Connection, gameweek: GameweekNumber) -> Result<MatchTally> {
    let sql = "SELECT COUNT(*), COALESCE(SUM(CASE WHEN status = 'completed' THEN 1 ELSE 0 END), 0) FROM real_matches WHERE gameweek = ?1";

    conn.query_row(sql, params![gameweek], |row| {
        Ok(MatchTally {
            total: row.get(0)?,
            completed: row.get(1)?,
        })
    })
    .context("Failed to count matches for gameweek")
}
