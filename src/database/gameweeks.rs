use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use super::models::Gameweek;
use crate::rules::{GameweekNumber, GameweekStatus};

const GAMEWEEK_COLUMNS: &str = "number, start_time, end_time, status";

pub fn insert_gameweek(
    conn: &Connection,
    number: GameweekNumber,
    start_time: Option<NaiveDateTime>,
    end_time: Option<NaiveDateTime>,
    status: GameweekStatus,
) -> Result<Gameweek> {
    let sql = format!(
        "INSERT INTO gameweeks (number, start_time, end_time, status) VALUES (?1, ?2, ?3, ?4) RETURNING {}",
        GAMEWEEK_COLUMNS
    );

    conn.query_row(&sql, params![number, start_time, end_time, status], parse_gameweek_row)
        .context("Failed to insert gameweek")
}

fn parse_gameweek_row(row: &rusqlite::Row) -> rusqlite::Result<Gameweek> {
    Ok(Gameweek {
        number: row.get(0)?,
        start_time: row.get(1)?,
        end_time: row.get(2)?,
        status: row.get(3)?,
    })
}

pub fn find_by_number(conn: &Connection, number: GameweekNumber) -> Result<Option<Gameweek>> {
    let sql = format!("SELECT {} FROM gameweeks WHERE number = ?1", GAMEWEEK_COLUMNS);

    conn.query_row(&sql, params![number], parse_gameweek_row)
        .optional()
        .context("Failed to query gameweek by number")
}

/// Upcoming and active gameweeks, earliest first.
pub fn list_open(conn: &Connection) -> Result<Vec<Gameweek>> {
    let sql = format!(
        "SELECT {} FROM gameweeks WHERE status IN ('upcoming', 'active') ORDER BY number ASC",
        GAMEWEEK_COLUMNS
    );
    query_gameweeks(conn, &sql)
}

/// Every gameweek still subject to automatic status changes, earliest first.
pub fn list_unfinalized(conn: &Connection) -> Result<Vec<Gameweek>> {
    let sql = format!(
        "SELECT {} FROM gameweeks WHERE status <> 'finalized' ORDER BY number ASC",
        GAMEWEEK_COLUMNS
    );
    query_gameweeks(conn, &sql)
}

fn query_gameweeks(conn: &Connection, sql: &str) -> Result<Vec<Gameweek>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_gameweek_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list gameweeks")?;

    Ok(rows)
}

pub fn update_status(conn: &Connection, number: GameweekNumber, status: GameweekStatus) -> Result<()> {
    conn.execute(
        "UPDATE gameweeks SET status = ?1 WHERE number = ?2",
        params![status, number],
    )
    .context("Failed to update gameweek status")
    .map(|_| ())
}
