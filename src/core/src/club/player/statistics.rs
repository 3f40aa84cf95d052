use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const FORM_WINDOW_SIZE: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatistics {
    pub played: u16,
    pub goals: u16,
    pub assists: u16,
    pub yellow_cards: u16,
    pub red_cards: u16,
    pub average_performance: f32,
    recent_performances: VecDeque<f32>,
}

impl PlayerStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one appearance and pushes its score into the rolling form window.
    pub fn record_performance(&mut self, performance: f32) {
        self.played += 1;

        if self.played <= 1 {
            self.average_performance = performance;
        } else {
            let games = self.played as f32;
            self.average_performance =
                (self.average_performance * (games - 1.0) + performance) / games;
        }

        self.recent_performances.push_back(performance);
        while self.recent_performances.len() > FORM_WINDOW_SIZE {
            self.recent_performances.pop_front();
        }
    }

    pub fn recent_performances(&self) -> impl Iterator<Item = &f32> {
        self.recent_performances.iter()
    }

    /// Mean of the form window, `None` before the first appearance.
    pub fn phase(&self) -> Option<f32> {
        if self.recent_performances.is_empty() {
            return None;
        }

        Some(self.recent_performances.iter().sum::<f32>() / self.recent_performances.len() as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_window_keeps_last_three() {
        let mut statistics = PlayerStatistics::new();

        for performance in [4.0, 6.0, 8.0, 10.0] {
            statistics.record_performance(performance);
        }

        assert_eq!(statistics.played, 4);
        assert_eq!(statistics.recent_performances().count(), FORM_WINDOW_SIZE);
        assert_eq!(statistics.phase(), Some(8.0));
        assert_eq!(statistics.average_performance, 7.0);
    }

    #[test]
    fn test_phase_empty_before_first_game() {
        assert_eq!(PlayerStatistics::new().phase(), None);
    }
}
