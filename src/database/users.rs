use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::User;
use crate::auth::Role;

const USER_COLUMNS: &str = "id, username, email, role, api_token, created_at";

pub fn insert_user(
    conn: &Connection,
    username: &str,
    email: Option<&str>,
    role: Role,
    api_token: Option<&str>,
) -> Result<User> {
    let sql = format!(
        "INSERT INTO users (username, email, role, api_token) VALUES (?1, ?2, ?3, ?4) RETURNING {}",
        USER_COLUMNS
    );

    conn.query_row(&sql, params![username, email, role, api_token], parse_user_row)
        .context("Failed to insert user")
}

fn parse_user_row(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        role: row.get(3)?,
        api_token: row.get(4)?,
        created_at: row.get(5)?,
    })
}

pub fn find_by_api_token(conn: &Connection, token: &str) -> Result<Option<User>> {
    let sql = format!("SELECT {} FROM users WHERE api_token = ?1", USER_COLUMNS);

    conn.query_row(&sql, params![token], parse_user_row)
        .optional()
        .context("Failed to query user by api token")
}
