//! Builders shared by the store and service tests.

use rusqlite::Connection;
use rust_decimal::Decimal;

use super::connection::{create_memory_pool, get_connection, DbPool};
use super::models::{FantasyTeam, User};
use super::{fantasy_teams, players, rosters, setup, users};
use crate::auth::Role;
use crate::rules::{PlayerId, Position};

pub fn test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
    setup::init_database(&conn).unwrap();
    conn
}

pub fn test_pool() -> DbPool {
    let pool = create_memory_pool().unwrap();
    let conn = get_connection(&pool).unwrap();
    setup::init_database(&conn).unwrap();
    pool
}

pub fn test_user(conn: &Connection, username: &str) -> User {
    users::insert_user(conn, username, None, Role::User, Some(&format!("token-{}", username))).unwrap()
}

pub fn test_team(conn: &Connection, username: &str) -> FantasyTeam {
    let owner = test_user(conn, username);
    fantasy_teams::insert_fantasy_team(conn, owner.id, None, &format!("{} FC", username)).unwrap()
}

/// Adds `count` new players of one position to the roster and returns their ids.
pub fn add_players(
    conn: &Connection,
    fantasy_team_id: i64,
    position: Position,
    count: usize,
    price: Decimal,
    is_starter: bool,
) -> Vec<PlayerId> {
    (0..count)
        .map(|n| {
            let name = format!("{} {}", position, n + 1);
            let player = players::insert_player(conn, &name, None, position, price).unwrap();
            rosters::insert_entry(conn, fantasy_team_id, player.id, is_starter).unwrap();
            player.id
        })
        .collect()
}

/// Starting lineup with the given counts plus nothing on the bench.
pub fn add_lineup(
    conn: &Connection,
    fantasy_team_id: i64,
    goalkeepers: usize,
    defenders: usize,
    midfielders: usize,
    forwards: usize,
) -> Vec<PlayerId> {
    let price = Decimal::new(50, 1);
    let mut ids = add_players(conn, fantasy_team_id, Position::Goalkeeper, goalkeepers, price, true);
    ids.extend(add_players(conn, fantasy_team_id, Position::Defender, defenders, price, true));
    ids.extend(add_players(conn, fantasy_team_id, Position::Midfielder, midfielders, price, true));
    ids.extend(add_players(conn, fantasy_team_id, Position::Forward, forwards, price, true));
    ids
}
