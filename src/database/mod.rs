pub mod connection;
pub mod fantasy_teams;
pub mod gameweeks;
pub mod leagues;
pub mod matches;
pub mod models;
pub mod players;
pub mod rosters;
pub mod scores;
pub mod setup;
pub mod teams;
pub mod transfers;
pub mod users;

#[cfg(test)]
pub(crate) mod fixtures;

pub use connection::{create_memory_pool, create_pool, get_connection, DbConn, DbPool};
pub use models::*;
