use serde::{Deserialize, Serialize};

/// Tunable constants of the season loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub season_days: u32,
    pub fixture_interval_days: u32,
    pub first_fixture_day: u32,
    pub kickoff_hours: Vec<u32>,

    pub min_squad_size: usize,
    pub target_squad_size: usize,
    pub release_satisfaction_threshold: u8,
    pub release_chance: f32,
    pub losing_streak_for_style_change: u8,

    pub safety_net_squad_size: usize,
    pub safety_net_rating_floor: u32,
    pub safety_net_player_rating: u16,

    pub cups: Vec<CupSettings>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            season_days: 60,
            fixture_interval_days: 2,
            first_fixture_day: 2,
            kickoff_hours: vec![15, 18, 20],
            min_squad_size: 16,
            target_squad_size: 18,
            release_satisfaction_threshold: 30,
            release_chance: 0.1,
            losing_streak_for_style_change: 3,
            safety_net_squad_size: 16,
            safety_net_rating_floor: 7000,
            safety_net_player_rating: 450,
            cups: vec![
                CupSettings::new(1, "Champions Cup", 1, 4),
                CupSettings::new(2, "Challenge Cup", 5, 8),
            ],
        }
    }
}

impl SimulationSettings {
    /// Whether `day` (season-relative) is one of the fixed-cadence fixture days.
    pub fn is_fixture_day(&self, day: u32) -> bool {
        let interval = self.fixture_interval_days.max(1);

        day >= self.first_fixture_day && (day - self.first_fixture_day) % interval == 0
    }

    pub fn kickoff_hour(&self, index: usize) -> u32 {
        if self.kickoff_hours.is_empty() {
            return 15;
        }

        self.kickoff_hours[index % self.kickoff_hours.len()]
    }
}

/// A knockout competition seeded from league standings.
///
/// `qualifying_positions` is an inclusive, 1-based range of table positions
/// taken from every league once the league phase is over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CupSettings {
    pub id: u32,
    pub name: String,
    pub qualifying_positions: (usize, usize),
}

impl CupSettings {
    pub fn new(id: u32, name: &str, from: usize, to: usize) -> Self {
        CupSettings {
            id,
            name: name.to_string(),
            qualifying_positions: (from, to),
        }
    }

    pub fn places_per_league(&self) -> usize {
        let (from, to) = self.qualifying_positions;

        if to < from || from == 0 {
            return 0;
        }

        to - from + 1
    }
}
