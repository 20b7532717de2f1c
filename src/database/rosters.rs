use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::models::{decimal_column, RosterEntry, RosterPlayer};
use crate::rules::{FantasyTeamId, PlayerId, Position};

pub fn insert_entry(
    conn: &Connection,
    fantasy_team_id: FantasyTeamId,
    player_id: PlayerId,
    is_starter: bool,
) -> Result<RosterEntry> {
    let sql = "INSERT INTO rosters (fantasy_team_id, player_id, is_starter) VALUES (?1, ?2, ?3) RETURNING id, fantasy_team_id, player_id, is_starter";

    conn.query_row(sql, params![fantasy_team_id, player_id, is_starter], |row| {
        Ok(RosterEntry {
            id: row.get(0)?,
            fantasy_team_id: row.get(1)?,
            player_id: row.get(2)?,
            is_starter: row.get(3)?,
        })
    })
    .with_context(|| format!("Failed to add player {} to fantasy team {}", player_id, fantasy_team_id))
}

/// Returns the number of entries removed (0 or 1).
pub fn delete_entry(conn: &Connection, fantasy_team_id: FantasyTeamId, player_id: PlayerId) -> Result<usize> {
    conn.execute(
        "DELETE FROM rosters WHERE fantasy_team_id = ?1 AND player_id = ?2",
        params![fantasy_team_id, player_id],
    )
    .context("Failed to remove roster entry")
}

pub fn list_players(conn: &Connection, fantasy_team_id: FantasyTeamId) -> Result<Vec<RosterPlayer>> {
    let sql = "SELECT p.id, p.position, p.price, r.is_starter
               FROM rosters r
               JOIN players p ON p.id = r.player_id
               WHERE r.fantasy_team_id = ?1
               ORDER BY p.id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![fantasy_team_id], |row| {
            Ok(RosterPlayer {
                player_id: row.get(0)?,
                position: row.get(1)?,
                price: decimal_column(row, 2)?,
                is_starter: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list roster players")?;

    Ok(rows)
}

pub fn starter_positions(conn: &Connection, fantasy_team_id: FantasyTeamId) -> Result<Vec<Position>> {
    let sql = "SELECT p.position
               FROM rosters r
               JOIN players p ON p.id = r.player_id
               WHERE r.fantasy_team_id = ?1 AND r.is_starter = 1";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![fantasy_team_id], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list starter positions")?;

    Ok(rows)
}

pub fn clear_starters(conn: &Connection, fantasy_team_id: FantasyTeamId) -> Result<()> {
    conn.execute(
        "UPDATE rosters SET is_starter = 0 WHERE fantasy_team_id = ?1",
        params![fantasy_team_id],
    )
    .context("Failed to clear starters")
    .map(|_| ())
}

/// Returns the number of entries flagged; 0 means the player is not on the roster.
pub fn mark_starter(conn: &Connection, fantasy_team_id: FantasyTeamId, player_id: PlayerId) -> Result<usize> {
    conn.execute(
        "UPDATE rosters SET is_starter = 1 WHERE fantasy_team_id = ?1 AND player_id = ?2",
        params![fantasy_team_id, player_id],
    )
    .context("Failed to mark starter")
}
