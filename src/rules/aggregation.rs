use super::types::{GameweekStats, PlayerAggregates};

/// Recomputes a player's season totals from the full score history.
/// Sums saturate at the `i32` bounds instead of wrapping.
pub fn aggregate_scores<'a, I>(scores: I) -> PlayerAggregates
where
    I: IntoIterator<Item = &'a GameweekStats>,
{
    scores
        .into_iter()
        .fold(PlayerAggregates::default(), |mut totals, stats| {
            totals.total_points = totals.total_points.saturating_add(stats.total_points);
            totals.goals_scored = totals.goals_scored.saturating_add(stats.goals);
            totals.assists = totals.assists.saturating_add(stats.assists);
            totals.yellow_cards = totals.yellow_cards.saturating_add(stats.yellow_cards);
            totals.red_cards = totals.red_cards.saturating_add(stats.red_cards);
            if stats.minutes_played > 0 {
                totals.games_played = totals.games_played.saturating_add(1);
            }
            if stats.clean_sheet {
                totals.clean_sheets = totals.clean_sheets.saturating_add(1);
            }
            totals
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(minutes: i32, goals: i32, assists: i32, clean_sheet: bool, points: i32) -> GameweekStats {
        GameweekStats {
            minutes_played: minutes,
            goals,
            assists,
            clean_sheet,
            total_points: points,
            ..GameweekStats::default()
        }
    }

    #[test]
    fn test_empty_history_is_all_zero() {
        let empty: Vec<GameweekStats> = Vec::new();
        assert_eq!(aggregate_scores(&empty), PlayerAggregates::default());
    }

    #[test]
    fn test_sums_and_counts() {
        let history = vec![
            GameweekStats {
                yellow_cards: 1,
                ..stats(90, 1, 0, true, 10)
            },
            stats(0, 0, 0, false, 0),
            GameweekStats {
                red_cards: 1,
                ..stats(45, 0, 2, false, 5)
            },
        ];

        let totals = aggregate_scores(&history);
        assert_eq!(totals.total_points, 15);
        assert_eq!(totals.games_played, 2);
        assert_eq!(totals.goals_scored, 1);
        assert_eq!(totals.assists, 2);
        assert_eq!(totals.clean_sheets, 1);
        assert_eq!(totals.yellow_cards, 1);
        assert_eq!(totals.red_cards, 1);
    }

    #[test]
    fn test_recomputation_is_stable() {
        let history = vec![stats(90, 2, 1, false, 13), stats(60, 0, 0, true, 6)];
        assert_eq!(aggregate_scores(&history), aggregate_scores(&history));
    }

    #[test]
    fn test_huge_totals_saturate() {
        let history = vec![stats(90, 0, 0, false, 1_500_000_000), stats(90, 0, 0, false, 1_500_000_000)];
        assert_eq!(aggregate_scores(&history).total_points, i32::MAX);

        let penalties = vec![stats(90, 0, 0, false, i32::MIN), stats(90, 0, 0, false, -1)];
        assert_eq!(aggregate_scores(&penalties).total_points, i32::MIN);
    }
}
