use crate::r#match::MatchOutcome;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

const DEFAULT_MATCH_LIST_SIZE: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchHistory {
    items: Vec<MatchHistoryItem>,
}

impl MatchHistory {
    pub fn new() -> Self {
        MatchHistory {
            items: Vec::with_capacity(DEFAULT_MATCH_LIST_SIZE),
        }
    }

    pub fn add(&mut self, item: MatchHistoryItem) {
        self.items.push(item);

        if self.items.len() > DEFAULT_MATCH_LIST_SIZE {
            self.items.remove(0);
        }
    }

    pub fn items(&self) -> &[MatchHistoryItem] {
        &self.items
    }

    pub fn last(&self) -> Option<&MatchHistoryItem> {
        self.items.last()
    }

    /// Consecutive losses counted back from the latest match.
    pub fn losing_streak(&self) -> u8 {
        self.items
            .iter()
            .rev()
            .take_while(|item| item.outcome() == MatchOutcome::Loss)
            .count() as u8
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchHistoryItem {
    pub date: NaiveDateTime,
    pub rival_club_id: u32,
    pub goals_for: u8,
    pub goals_against: u8,
}

impl MatchHistoryItem {
    pub fn new(date: NaiveDateTime, rival_club_id: u32, goals_for: u8, goals_against: u8) -> Self {
        MatchHistoryItem {
            date,
            rival_club_id,
            goals_for,
            goals_against,
        }
    }

    pub fn outcome(&self) -> MatchOutcome {
        MatchOutcome::from_goals(self.goals_for, self.goals_against)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 8, day)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_losing_streak_counts_trailing_losses() {
        let mut history = MatchHistory::new();

        history.add(MatchHistoryItem::new(date(1), 2, 0, 1));
        history.add(MatchHistoryItem::new(date(3), 3, 2, 2));
        history.add(MatchHistoryItem::new(date(5), 4, 0, 3));
        history.add(MatchHistoryItem::new(date(7), 5, 1, 2));

        assert_eq!(history.losing_streak(), 2);

        history.add(MatchHistoryItem::new(date(9), 6, 1, 0));
        assert_eq!(history.losing_streak(), 0);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut history = MatchHistory::new();

        for day in 1..=15 {
            history.add(MatchHistoryItem::new(date(day), 2, 0, 1));
        }

        assert_eq!(history.items().len(), DEFAULT_MATCH_LIST_SIZE);
        assert_eq!(history.losing_streak(), 10);
    }
}
