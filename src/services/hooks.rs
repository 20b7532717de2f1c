use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Utc};
use log::debug;
use rusqlite::Connection;

use crate::database::{self, GameweekScore, NewGameweekScore};
use crate::rules::{aggregate_scores, PlayerAggregates};

/// Runs after every insert or update of a gameweek score, inside the
/// transaction that wrote it. An error rolls the score write back.
pub trait ScoreWriteHook: Send + Sync {
    fn name(&self) -> &'static str;

    fn after_write(&self, conn: &Connection, score: &GameweekScore) -> Result<()>;
}

/// Keeps a player's running totals equal to the sum of their score history.
pub struct PlayerTotalsHook;

impl ScoreWriteHook for PlayerTotalsHook {
    fn name(&self) -> &'static str {
        "player_totals"
    }

    fn after_write(&self, conn: &Connection, score: &GameweekScore) -> Result<()> {
        on_gameweek_score_written(conn, score, Utc::now().naive_utc()).map(|_| ())
    }
}

/// Recomputes total points, goals and assists for the scored player from
/// every one of their gameweek rows and stamps `updated_at`.
pub fn on_gameweek_score_written(
    conn: &Connection,
    score: &GameweekScore,
    now: NaiveDateTime,
) -> Result<PlayerAggregates> {
    let history = database::scores::list_for_player(conn, score.player_id)?;
    let totals = aggregate_scores(history.iter().map(|row| &row.stats));

    database::players::update_scoring_totals(conn, score.player_id, &totals, now)?;
    debug!(
        "Player {} totals after gameweek {}: {} points",
        score.player_id, score.gameweek, totals.total_points
    );
    Ok(totals)
}

/// Write path for gameweek scores: one transaction per write, hooks included.
pub struct ScoreWriter {
    hooks: Vec<Box<dyn ScoreWriteHook>>,
}

impl Default for ScoreWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreWriter {
    pub fn new() -> Self {
        let hooks: Vec<Box<dyn ScoreWriteHook>> = vec![Box::new(PlayerTotalsHook)];
        Self::with_hooks(hooks)
    }

    pub fn with_hooks(hooks: Vec<Box<dyn ScoreWriteHook>>) -> Self {
        Self { hooks }
    }

    pub fn record(&self, conn: &mut Connection, score: &NewGameweekScore) -> Result<GameweekScore> {
        let tx = conn.transaction().context("Failed to begin score transaction")?;
        let stored = database::scores::upsert_score(&tx, score, Utc::now().naive_utc())?;

        for hook in &self.hooks {
            hook.after_write(&tx, &stored)
                .with_context(|| format!("Score hook {} failed", hook.name()))?;
        }

        tx.commit().context("Failed to commit score transaction")?;
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::fixtures::test_connection;
    use crate::database::players::{find_by_id, insert_player};
    use crate::rules::{GameweekStats, PlayerId, Position};
    use rust_decimal_macros::dec;

    struct FailingHook;

    impl ScoreWriteHook for FailingHook {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn after_write(&self, _conn: &Connection, _score: &GameweekScore) -> Result<()> {
            anyhow::bail!("boom")
        }
    }

    fn score(player_id: PlayerId, gameweek: i32, points: i32, goals: i32) -> NewGameweekScore {
        NewGameweekScore {
            player_id,
            gameweek,
            stats: GameweekStats {
                minutes_played: 90,
                goals,
                assists: 1,
                yellow_cards: 1,
                total_points: points,
                ..GameweekStats::default()
            },
        }
    }

    #[test]
    fn test_totals_include_new_row() {
        let mut conn = test_connection();
        let player = insert_player(&conn, "Forward", None, Position::Forward, dec!(8.5)).unwrap();
        let writer = ScoreWriter::new();

        writer.record(&mut conn, &score(player.id, 1, 6, 1)).unwrap();
        writer.record(&mut conn, &score(player.id, 2, 9, 2)).unwrap();

        let loaded = find_by_id(&conn, player.id).unwrap().unwrap();
        assert_eq!(loaded.total_points, 15);
        assert_eq!(loaded.goals_scored, 3);
        assert_eq!(loaded.assists, 2);
        assert!(loaded.updated_at.is_some());
    }

    #[test]
    fn test_hook_only_maintains_scoring_columns() {
        let mut conn = test_connection();
        let player = insert_player(&conn, "Forward", None, Position::Forward, dec!(8.5)).unwrap();

        ScoreWriter::new().record(&mut conn, &score(player.id, 1, 6, 1)).unwrap();

        let loaded = find_by_id(&conn, player.id).unwrap().unwrap();
        assert_eq!(loaded.games_played, 0);
        assert_eq!(loaded.yellow_cards, 0);
    }

    #[test]
    fn test_update_recomputes_instead_of_adding() {
        let mut conn = test_connection();
        let player = insert_player(&conn, "Forward", None, Position::Forward, dec!(8.5)).unwrap();
        let writer = ScoreWriter::new();

        writer.record(&mut conn, &score(player.id, 1, 6, 1)).unwrap();
        writer.record(&mut conn, &score(player.id, 1, 2, 0)).unwrap();

        let loaded = find_by_id(&conn, player.id).unwrap().unwrap();
        assert_eq!(loaded.total_points, 2);
        assert_eq!(loaded.goals_scored, 0);
    }

    #[test]
    fn test_failing_hook_rolls_back_score() {
        let mut conn = test_connection();
        let player = insert_player(&conn, "Forward", None, Position::Forward, dec!(8.5)).unwrap();
        let hooks: Vec<Box<dyn ScoreWriteHook>> = vec![Box::new(PlayerTotalsHook), Box::new(FailingHook)];
        let writer = ScoreWriter::with_hooks(hooks);

        let result = writer.record(&mut conn, &score(player.id, 1, 6, 1));

        assert!(result.is_err());
        assert!(database::scores::find(&conn, player.id, 1).unwrap().is_none());
        let loaded = find_by_id(&conn, player.id).unwrap().unwrap();
        assert_eq!(loaded.total_points, 0);
    }

    #[test]
    fn test_hook_in_isolation() {
        let conn = test_connection();
        let player = insert_player(&conn, "Keeper", None, Position::Goalkeeper, dec!(5.0)).unwrap();
        let stored = database::scores::upsert_score(&conn, &score(player.id, 4, 7, 0), Utc::now().naive_utc()).unwrap();

        let totals = on_gameweek_score_written(&conn, &stored, Utc::now().naive_utc()).unwrap();

        assert_eq!(totals.total_points, 7);
        assert_eq!(find_by_id(&conn, player.id).unwrap().unwrap().total_points, 7);
    }
}
