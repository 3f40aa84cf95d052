use crate::r#match::MatchResult;
use serde::{Deserialize, Serialize};

const WIN_POINTS: u16 = 3;
const DRAW_POINTS: u16 = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueTableRow {
    pub club_id: u32,
    pub played: u16,
    pub win: u16,
    pub draw: u16,
    pub lost: u16,
    pub goal_scored: i32,
    pub goal_concerned: i32,
    pub points: u16,
}

impl LeagueTableRow {
    pub fn new(club_id: u32) -> Self {
        LeagueTableRow {
            club_id,
            ..Default::default()
        }
    }

    pub fn goal_difference(&self) -> i32 {
        self.goal_scored - self.goal_concerned
    }

    fn apply(&mut self, goals_for: u8, goals_against: u8) {
        self.played += 1;
        self.goal_scored += goals_for as i32;
        self.goal_concerned += goals_against as i32;

        match goals_for.cmp(&goals_against) {
            std::cmp::Ordering::Greater => {
                self.win += 1;
                self.points += WIN_POINTS;
            }
            std::cmp::Ordering::Equal => {
                self.draw += 1;
                self.points += DRAW_POINTS;
            }
            std::cmp::Ordering::Less => self.lost += 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueTable {
    pub rows: Vec<LeagueTableRow>,
}

impl LeagueTable {
    pub fn new(club_ids: &[u32]) -> Self {
        let mut table = LeagueTable {
            rows: club_ids.iter().map(|id| LeagueTableRow::new(*id)).collect(),
        };

        table.sort();
        table
    }

    pub fn get(&self) -> &[LeagueTableRow] {
        &self.rows
    }

    pub fn row(&self, club_id: u32) -> Option<&LeagueTableRow> {
        self.rows.iter().find(|row| row.club_id == club_id)
    }

    /// 1-based table position.
    pub fn position(&self, club_id: u32) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.club_id == club_id)
            .map(|index| index + 1)
    }

    pub fn leader(&self) -> Option<u32> {
        self.rows.first().map(|row| row.club_id)
    }

    /// Club ids at the inclusive 1-based positions `from..=to`.
    pub fn clubs_in_positions(&self, from: usize, to: usize) -> Vec<u32> {
        self.rows
            .iter()
            .skip(from.saturating_sub(1))
            .take((to + 1).saturating_sub(from.max(1)))
            .map(|row| row.club_id)
            .collect()
    }

    pub fn update(&mut self, result: &MatchResult) {
        for (club_id, goals_for, goals_against) in [
            (result.home_club_id, result.score.home, result.score.away),
            (result.away_club_id, result.score.away, result.score.home),
        ] {
            if let Some(row) = self.rows.iter_mut().find(|row| row.club_id == club_id) {
                row.apply(goals_for, goals_against);
            }
        }

        self.sort();
    }

    /// Points, then goal difference, then goals scored, then club id.
    fn sort(&mut self) {
        self.rows.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then(b.goal_difference().cmp(&a.goal_difference()))
                .then(b.goal_scored.cmp(&a.goal_scored))
                .then(a.club_id.cmp(&b.club_id))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::Score;

    fn result(home: u32, away: u32, home_goals: u8, away_goals: u8) -> MatchResult {
        let mut result = MatchResult::empty(home, away);
        result.score = Score::new(home_goals, away_goals);
        result
    }

    #[test]
    fn test_points_and_counters() {
        let mut table = LeagueTable::new(&[1, 2, 3]);

        table.update(&result(1, 2, 2, 0));
        table.update(&result(3, 1, 1, 1));

        let first = table.row(1).unwrap();
        assert_eq!((first.played, first.win, first.draw, first.lost), (2, 1, 1, 0));
        assert_eq!(first.points, 4);
        assert_eq!(first.goal_difference(), 2);

        assert_eq!(table.row(2).unwrap().points, 0);
        assert_eq!(table.row(3).unwrap().points, 1);
        assert_eq!(table.leader(), Some(1));
    }

    #[test]
    fn test_goal_difference_breaks_point_ties() {
        let mut table = LeagueTable::new(&[1, 2, 3, 4]);

        table.update(&result(1, 3, 1, 0));
        table.update(&result(2, 4, 4, 0));

        assert_eq!(table.position(2), Some(1));
        assert_eq!(table.position(1), Some(2));
    }

    #[test]
    fn test_full_ties_are_deterministic() {
        let mut table = LeagueTable::new(&[7, 3, 5]);

        table.update(&result(7, 3, 1, 1));

        let order: Vec<u32> = table.get().iter().map(|row| row.club_id).collect();
        assert_eq!(order, vec![3, 7, 5]);
    }

    #[test]
    fn test_clubs_in_positions() {
        let table = LeagueTable::new(&[1, 2, 3, 4, 5, 6]);

        assert_eq!(table.clubs_in_positions(1, 4), vec![1, 2, 3, 4]);
        assert_eq!(table.clubs_in_positions(5, 8), vec![5, 6]);
    }
}
