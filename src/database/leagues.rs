use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::League;
use crate::auth::UserId;

pub fn insert_league(conn: &Connection, name: &str, created_by: Option<UserId>) -> Result<League> {
    let sql = "INSERT INTO leagues (name, created_by) VALUES (?1, ?2) RETURNING id, name, created_by";

    conn.query_row(sql, params![name, created_by], parse_league_row)
        .context("Failed to insert league")
}

fn parse_league_row(row: &rusqlite::Row) -> rusqlite::Result<League> {
    Ok(League {
        id: row.get(0)?,
        name: row.get(1)?,
        created_by: row.get(2)?,
    })
}

pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<League>> {
    let sql = "SELECT id, name, created_by FROM leagues WHERE id = ?1";

    conn.query_row(sql, params![id], parse_league_row)
        .optional()
        .context("Failed to query league by id")
}
