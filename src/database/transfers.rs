use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::models::TransferRecord;
use crate::rules::{FantasyTeamId, GameweekNumber, PlayerId};

const TRANSFER_COLUMNS: &str = "id, fantasy_team_id, player_in_id, player_out_id, gameweek, created_at";

pub fn insert_transfer(
    conn: &Connection,
    fantasy_team_id: FantasyTeamId,
    player_in_id: PlayerId,
    player_out_id: PlayerId,
    gameweek: Option<GameweekNumber>,
) -> Result<TransferRecord> {
    let sql = format!(
        "INSERT INTO transactions (fantasy_team_id, player_in_id, player_out_id, gameweek) VALUES (?1, ?2, ?3, ?4) RETURNING {}",
        TRANSFER_COLUMNS
    );

    conn.query_row(
        &sql,
        params![fantasy_team_id, player_in_id, player_out_id, gameweek],
        parse_transfer_row,
    )
    .context("Failed to record transfer")
}

fn parse_transfer_row(row: &rusqlite::Row) -> rusqlite::Result<TransferRecord> {
    Ok(TransferRecord {
        id: row.get(0)?,
        fantasy_team_id: row.get(1)?,
        player_in_id: row.get(2)?,
        player_out_id: row.get(3)?,
        gameweek: row.get(4)?,
        created_at: row.get(5)?,
    })
}

/// Newest first.
pub fn list_for_team(conn: &Connection, fantasy_team_id: FantasyTeamId) -> Result<Vec<TransferRecord>> {
    let sql = format!(
        "SELECT {} FROM transactions WHERE fantasy_team_id = ?1 ORDER BY id DESC",
        TRANSFER_COLUMNS
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![fantasy_team_id], parse_transfer_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list transfers")?;

    Ok(rows)
}
