use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Win,
    Draw,
    Loss,
}

impl MatchOutcome {
    pub fn from_goals(goals_for: u8, goals_against: u8) -> Self {
        if goals_for > goals_against {
            MatchOutcome::Win
        } else if goals_for < goals_against {
            MatchOutcome::Loss
        } else {
            MatchOutcome::Draw
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}

impl Score {
    pub fn new(home: u8, away: u8) -> Self {
        Score { home, away }
    }

    pub fn is_draw(&self) -> bool {
        self.home == self.away
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchEventKind {
    Goal { scorer_id: u32, assist_id: Option<u32> },
    Chance { player_id: u32, on_target: bool },
    Foul { player_id: u32 },
    YellowCard { player_id: u32 },
    RedCard { player_id: u32 },
    Injury { player_id: u32 },
    Penalties,
    Commentary { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub minute: u8,
    pub club_id: Option<u32>,
    pub kind: MatchEventKind,
}

impl MatchEvent {
    pub fn new(minute: u8, club_id: Option<u32>, kind: MatchEventKind) -> Self {
        MatchEvent {
            minute,
            club_id,
            kind,
        }
    }

    pub fn is_commentary(&self) -> bool {
        matches!(self.kind, MatchEventKind::Commentary { .. })
    }
}

/// Aggregate counters derived from the event list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    pub home_possession: u8,
    pub away_possession: u8,
    pub home_shots: u16,
    pub away_shots: u16,
    pub home_shots_on_target: u16,
    pub away_shots_on_target: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub home_club_id: u32,
    pub away_club_id: u32,
    pub score: Score,
    pub events: Vec<MatchEvent>,
    pub stats: MatchStats,
    /// Mean duel score per participating player.
    pub performances: BTreeMap<u32, f32>,
    pub home_lineup: Vec<u32>,
    pub away_lineup: Vec<u32>,
    pub decided_on_penalties: bool,
}

impl MatchResult {
    /// 0–0 with no events, used when a fixture cannot be staged.
    pub fn empty(home_club_id: u32, away_club_id: u32) -> Self {
        MatchResult {
            home_club_id,
            away_club_id,
            score: Score::default(),
            events: Vec::new(),
            stats: MatchStats {
                home_possession: 50,
                away_possession: 50,
                ..MatchStats::default()
            },
            performances: BTreeMap::new(),
            home_lineup: Vec::new(),
            away_lineup: Vec::new(),
            decided_on_penalties: false,
        }
    }

    pub fn goals_for(&self, club_id: u32) -> u8 {
        if club_id == self.home_club_id {
            self.score.home
        } else {
            self.score.away
        }
    }

    pub fn goals_against(&self, club_id: u32) -> u8 {
        if club_id == self.home_club_id {
            self.score.away
        } else {
            self.score.home
        }
    }

    pub fn outcome_for(&self, club_id: u32) -> MatchOutcome {
        MatchOutcome::from_goals(self.goals_for(club_id), self.goals_against(club_id))
    }

    pub fn winner(&self) -> Option<u32> {
        match self.score.home.cmp(&self.score.away) {
            std::cmp::Ordering::Greater => Some(self.home_club_id),
            std::cmp::Ordering::Less => Some(self.away_club_id),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn lineup(&self, club_id: u32) -> &[u32] {
        if club_id == self.home_club_id {
            &self.home_lineup
        } else {
            &self.away_lineup
        }
    }

    pub fn scorers(&self) -> impl Iterator<Item = u32> + '_ {
        self.events.iter().filter_map(|event| match event.kind {
            MatchEventKind::Goal { scorer_id, .. } => Some(scorer_id),
            _ => None,
        })
    }

    pub fn assisters(&self) -> impl Iterator<Item = u32> + '_ {
        self.events.iter().filter_map(|event| match event.kind {
            MatchEventKind::Goal { assist_id, .. } => assist_id,
            _ => None,
        })
    }
}
