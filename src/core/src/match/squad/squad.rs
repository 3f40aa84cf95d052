use crate::club::{Club, ClubTactics};
use crate::r#match::{Lineup, SectorStrengths, SquadSelector};
use crate::Player;
use serde::{Deserialize, Serialize};

const FORM_BASELINE: f32 = 6.0;
const FORM_SCALE: f32 = 20.0;
const FORM_MIN: f32 = 0.85;
const FORM_MAX: f32 = 1.15;

/// Owned snapshot of one side of a fixture: the engine never reads the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSquad {
    pub club_id: u32,
    pub club_name: String,
    pub lineup: Lineup,
    pub sectors: SectorStrengths,
    pub tactics: ClubTactics,
    pub form: f32,
}

impl MatchSquad {
    /// `players` are the resolved roster members of `club`.
    pub fn from_club(club: &Club, players: &[&Player]) -> Self {
        let lineup = SquadSelector::select(players);
        let sectors = SquadSelector::sector_strengths(&lineup);

        let phases: Vec<f32> = players
            .iter()
            .filter(|player| lineup.contains(player.id))
            .filter_map(|player| player.statistics.phase())
            .collect();

        MatchSquad {
            club_id: club.id,
            club_name: club.name.clone(),
            lineup,
            sectors,
            tactics: club.tactics.clone(),
            form: Self::form_factor(&phases),
        }
    }

    /// Neutral side used when a club cannot be resolved.
    pub fn empty(club_id: u32, club_name: &str) -> Self {
        MatchSquad {
            club_id,
            club_name: club_name.to_string(),
            lineup: Lineup::default(),
            sectors: SectorStrengths::default(),
            tactics: ClubTactics::default(),
            form: 1.0,
        }
    }

    /// `1 + (mean phase - 6) / 20`, bounded to [0.85, 1.15].
    pub fn form_factor(phases: &[f32]) -> f32 {
        if phases.is_empty() {
            return 1.0;
        }

        let mean = phases.iter().sum::<f32>() / phases.len() as f32;

        (1.0 + (mean - FORM_BASELINE) / FORM_SCALE).clamp(FORM_MIN, FORM_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_factor_bounds() {
        assert_eq!(MatchSquad::form_factor(&[]), 1.0);
        assert!((MatchSquad::form_factor(&[8.0]) - 1.1).abs() < 1e-6);
        assert_eq!(MatchSquad::form_factor(&[10.0, 10.0]), FORM_MAX);
        assert_eq!(MatchSquad::form_factor(&[0.0]), FORM_MIN);
    }

    #[test]
    fn test_empty_squad_is_neutral() {
        let squad = MatchSquad::empty(3, "Ghosts");

        assert!(squad.lineup.is_empty());
        assert_eq!(squad.sectors, SectorStrengths::default());
        assert_eq!(squad.form, 1.0);
    }
}
