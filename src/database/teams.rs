use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::Team;

pub fn insert_team(conn: &Connection, name: &str, short_name: Option<&str>) -> Result<Team> {
    let sql = "INSERT INTO teams (name, short_name) VALUES (?1, ?2) RETURNING id, name, short_name";

    conn.query_row(sql, params![name, short_name], parse_team_row)
        .context("Failed to insert team")
}

fn parse_team_row(row: &rusqlite::Row) -> rusqlite::Result<Team> {
    Ok(Team {
        id: row.get(0)?,
        name: row.get(1)?,
        short_name: row.get(2)?,
    })
}

pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Team>> {
    let sql = "SELECT id, name, short_name FROM teams WHERE id = ?1";

    conn.query_row(sql, params![id], parse_team_row)
        .optional()
        .context("Failed to query team by id")
}
