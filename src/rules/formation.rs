use serde::Serialize;

use super::types::Position;
use crate::config::settings::{FormationRules, PositionLimit};

/// Starter counts per position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Formation {
    pub goalkeepers: u32,
    pub defenders: u32,
    pub midfielders: u32,
    pub forwards: u32,
}

impl Formation {
    pub fn from_positions<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        positions
            .into_iter()
            .fold(Formation::default(), |mut formation, position| {
                formation.add(position);
                formation
            })
    }

    fn add(&mut self, position: Position) {
        match position {
            Position::Goalkeeper => self.goalkeepers += 1,
            Position::Defender => self.defenders += 1,
            Position::Midfielder => self.midfielders += 1,
            Position::Forward => self.forwards += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.goalkeepers + self.defenders + self.midfielders + self.forwards
    }

    /// Outfield shape as `DEF-MID-FWD`, e.g. `4-4-2`.
    pub fn render(&self) -> String {
        format!("{}-{}-{}", self.defenders, self.midfielders, self.forwards)
    }

    /// Every position range and the starter total are checked on their own:
    /// 1+3+2+1 satisfies each range but is still not a lineup.
    pub fn is_valid(&self, rules: &FormationRules) -> bool {
        within(self.goalkeepers, &rules.goalkeepers)
            && within(self.defenders, &rules.defenders)
            && within(self.midfielders, &rules.midfielders)
            && within(self.forwards, &rules.forwards)
            && self.total() == rules.starters
    }
}

fn within(count: u32, limit: &PositionLimit) -> bool {
    count >= limit.min && count <= limit.max
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lineup(gk: usize, def: usize, mid: usize, fwd: usize) -> Formation {
        let positions = std::iter::repeat_n(Position::Goalkeeper, gk)
            .chain(std::iter::repeat_n(Position::Defender, def))
            .chain(std::iter::repeat_n(Position::Midfielder, mid))
            .chain(std::iter::repeat_n(Position::Forward, fwd));
        Formation::from_positions(positions)
    }

    #[test]
    fn test_four_four_two_is_valid() {
        let formation = lineup(1, 4, 4, 2);
        assert_eq!(formation.render(), "4-4-2");
        assert_eq!(formation.total(), 11);
        assert!(formation.is_valid(&FormationRules::default()));
    }

    #[test]
    fn test_four_three_three_is_valid() {
        let formation = lineup(1, 4, 3, 3);
        assert_eq!(formation.render(), "4-3-3");
        assert!(formation.is_valid(&FormationRules::default()));
    }

    #[test]
    fn test_too_few_defenders_is_invalid() {
        let formation = lineup(1, 2, 4, 2);
        assert_eq!(formation.total(), 9);
        assert!(!formation.is_valid(&FormationRules::default()));
    }

    #[test]
    fn test_ranges_alone_do_not_make_a_lineup() {
        let formation = lineup(1, 3, 2, 1);
        assert_eq!(formation.total(), 7);
        assert!(!formation.is_valid(&FormationRules::default()));
    }

    #[test]
    fn test_eleven_starters_with_two_goalkeepers_is_invalid() {
        let formation = lineup(2, 4, 3, 2);
        assert_eq!(formation.total(), 11);
        assert!(!formation.is_valid(&FormationRules::default()));
    }

    #[test]
    fn test_goalkeeper_not_rendered() {
        assert_eq!(lineup(0, 5, 3, 2).render(), "5-3-2");
        assert_eq!(Formation::default().render(), "0-0-0");
    }
}
