use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use super::models::{decimal_column, Player};
use crate::rules::{PlayerAggregates, PlayerId, Position};

const PLAYER_COLUMNS: &str = "id, name, team_id, position, price, total_points, games_played, goals_scored, assists, clean_sheets, yellow_cards, red_cards, updated_at";

pub fn insert_player(
    conn: &Connection,
    name: &str,
    team_id: Option<i64>,
    position: Position,
    price: Decimal,
) -> Result<Player> {
    let sql = format!(
        "INSERT INTO players (name, team_id, position, price) VALUES (?1, ?2, ?3, ?4) RETURNING {}",
        PLAYER_COLUMNS
    );

    conn.query_row(
        &sql,
        params![name, team_id, position, price.to_string()],
        parse_player_row,
    )
    .context("Failed to insert player")
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        team_id: row.get(2)?,
        position: row.get(3)?,
        price: decimal_column(row, 4)?,
        total_points: row.get(5)?,
        games_played: row.get(6)?,
        goals_scored: row.get(7)?,
        assists: row.get(8)?,
        clean_sheets: row.get(9)?,
        yellow_cards: row.get(10)?,
        red_cards: row.get(11)?,
        updated_at: row.get(12)?,
    })
}

pub fn find_by_id(conn: &Connection, id: PlayerId) -> Result<Option<Player>> {
    let sql = format!("SELECT {} FROM players WHERE id = ?1", PLAYER_COLUMNS);

    conn.query_row(&sql, params![id], parse_player_row)
        .optional()
        .context("Failed to query player by id")
}

pub fn list_ids(conn: &Connection) -> Result<Vec<PlayerId>> {
    let mut stmt = conn.prepare("SELECT id FROM players ORDER BY id")?;
    let rows = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Overwrites every aggregate column with a full recomputation.
pub fn update_aggregates(
    conn: &Connection,
    id: PlayerId,
    totals: &PlayerAggregates,
    updated_at: NaiveDateTime,
) -> Result<()> {
    let sql = "UPDATE players SET total_points = ?1, games_played = ?2, goals_scored = ?3, assists = ?4, clean_sheets = ?5, yellow_cards = ?6, red_cards = ?7, updated_at = ?8 WHERE id = ?9";

    conn.execute(
        sql,
        params![
            totals.total_points,
            totals.games_played,
            totals.goals_scored,
            totals.assists,
            totals.clean_sheets,
            totals.yellow_cards,
            totals.red_cards,
            updated_at,
            id
        ],
    )
    .context("Failed to update player aggregates")
    .map(|_| ())
}

/// Only the columns maintained on every score write.
pub fn update_scoring_totals(
    conn: &Connection,
    id: PlayerId,
    totals: &PlayerAggregates,
    updated_at: NaiveDateTime,
) -> Result<()> {
    let sql = "UPDATE players SET total_points = ?1, goals_scored = ?2, assists = ?3, updated_at = ?4 WHERE id = ?5";

    let changed = conn
        .execute(
            sql,
            params![totals.total_points, totals.goals_scored, totals.assists, updated_at, id],
        )
        .context("Failed to update player scoring totals")?;

    if changed == 0 {
        anyhow::bail!("Player {} does not exist", id);
    }
    Ok(())
}
