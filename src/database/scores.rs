use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{GameweekScore, NewGameweekScore};
use crate::rules::{GameweekNumber, GameweekStats, PlayerId};

const SCORE_COLUMNS: &str = "id, player_id, gameweek, minutes_played, goals, assists, clean_sheet, yellow_cards, red_cards, saves, bonus_points, total_points, updated_at";

/// Inserts the score, or replaces the stats of an existing (player, gameweek) row.
pub fn upsert_score(conn: &Connection, score: &NewGameweekScore, now: NaiveDateTime) -> Result<GameweekScore> {
    let sql = format!(
        "INSERT INTO gameweek_scores (player_id, gameweek, minutes_played, goals, assists, clean_sheet, yellow_cards, red_cards, saves, bonus_points, total_points, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
         ON CONFLICT (player_id, gameweek) DO UPDATE SET
             minutes_played = excluded.minutes_played,
             goals = excluded.goals,
             assists = excluded.assists,
             clean_sheet = excluded.clean_sheet,
             yellow_cards = excluded.yellow_cards,
             red_cards = excluded.red_cards,
             saves = excluded.saves,
             bonus_points = excluded.bonus_points,
             total_points = excluded.total_points,
             updated_at = excluded.updated_at
         RETURNING {}",
        SCORE_COLUMNS
    );

    let stats = &score.stats;
    conn.query_row(
        &sql,
        params![
            score.player_id,
            score.gameweek,
            stats.minutes_played,
            stats.goals,
            stats.assists,
            stats.clean_sheet,
            stats.yellow_cards,
            stats.red_cards,
            stats.saves,
            stats.bonus_points,
            stats.total_points,
            now
        ],
        parse_score_row,
    )
    .with_context(|| {
        format!(
            "Failed to write score for player {} in gameweek {}",
            score.player_id, score.gameweek
        )
    })
}

fn parse_score_row(row: &rusqlite::Row) -> rusqlite::Result<GameweekScore> {
    Ok(GameweekScore {
        id: row.get(0)?,
        player_id: row.get(1)?,
        gameweek: row.get(2)?,
        stats: GameweekStats {
            minutes_played: row.get(3)?,
            goals: row.get(4)?,
            assists: row.get(5)?,
            clean_sheet: row.get(6)?,
            yellow_cards: row.get(7)?,
            red_cards: row.get(8)?,
            saves: row.get(9)?,
            bonus_points: row.get(10)?,
            total_points: row.get(11)?,
        },
        updated_at: row.get(12)?,
    })
}

pub fn find(conn: &Connection, player_id: PlayerId, gameweek: GameweekNumber) -> Result<Option<GameweekScore>> {
    let sql = format!(
        "SELECT {} FROM gameweek_scores WHERE player_id = ?1 AND gameweek = ?2",
        SCORE_COLUMNS
    );

    conn.query_row(&sql, params![player_id, gameweek], parse_score_row)
        .optional()
        .context("Failed to query gameweek score")
}

pub fn list_for_player(conn: &Connection, player_id: PlayerId) -> Result<Vec<GameweekScore>> {
    let sql = format!(
        "SELECT {} FROM gameweek_scores WHERE player_id = ?1 ORDER BY gameweek",
        SCORE_COLUMNS
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![player_id], parse_score_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list gameweek scores for player")?;

    Ok(rows)
}
