use crate::{Player, PlayerPositionType};
use log::debug;
use serde::{Deserialize, Serialize};

pub const OFF_ROLE_WEIGHT: f32 = 0.6;
pub const GOALKEEPER_FALLBACK_WEIGHT: f32 = 0.5;
pub const EMPTY_SECTOR_STRENGTH: u8 = 50;

/// Outfield quotas, filled in this order.
const FORMATION: [(PlayerPositionType, usize); 3] = [
    (PlayerPositionType::Defender, 4),
    (PlayerPositionType::Midfielder, 3),
    (PlayerPositionType::Forward, 3),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineupSlot {
    pub player_id: u32,
    pub rating: u16,
    pub slot: PlayerPositionType,
    pub on_role: bool,
}

impl LineupSlot {
    pub fn weight(&self) -> f32 {
        match (self.on_role, self.slot) {
            (true, _) => 1.0,
            (false, PlayerPositionType::Goalkeeper) => GOALKEEPER_FALLBACK_WEIGHT,
            (false, _) => OFF_ROLE_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    pub goalkeeper: Option<LineupSlot>,
    pub defenders: Vec<LineupSlot>,
    pub midfielders: Vec<LineupSlot>,
    pub forwards: Vec<LineupSlot>,
}

impl Lineup {
    pub fn outfield(&self) -> impl Iterator<Item = &LineupSlot> {
        self.defenders
            .iter()
            .chain(self.midfielders.iter())
            .chain(self.forwards.iter())
    }

    pub fn slots(&self) -> impl Iterator<Item = &LineupSlot> {
        self.goalkeeper.iter().chain(self.outfield())
    }

    pub fn player_ids(&self) -> Vec<u32> {
        self.slots().map(|slot| slot.player_id).collect()
    }

    pub fn contains(&self, player_id: u32) -> bool {
        self.slots().any(|slot| slot.player_id == player_id)
    }

    pub fn len(&self) -> usize {
        self.slots().count()
    }

    pub fn is_empty(&self) -> bool {
        self.goalkeeper.is_none() && self.outfield().next().is_none()
    }

    fn sector_mut(&mut self, position: PlayerPositionType) -> &mut Vec<LineupSlot> {
        match position {
            PlayerPositionType::Defender | PlayerPositionType::Goalkeeper => &mut self.defenders,
            PlayerPositionType::Midfielder => &mut self.midfielders,
            PlayerPositionType::Forward => &mut self.forwards,
        }
    }
}

/// The four 0–100 strengths the duel resolver consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorStrengths {
    pub attack: u8,
    pub midfield: u8,
    pub defense: u8,
    pub goalkeeping: u8,
}

impl Default for SectorStrengths {
    fn default() -> Self {
        SectorStrengths {
            attack: EMPTY_SECTOR_STRENGTH,
            midfield: EMPTY_SECTOR_STRENGTH,
            defense: EMPTY_SECTOR_STRENGTH,
            goalkeeping: EMPTY_SECTOR_STRENGTH,
        }
    }
}

pub struct SquadSelector;

impl SquadSelector {
    /// Picks a goalkeeper and a 4-3-3 from the available players, preferring
    /// on-role players and filling gaps off-role.
    pub fn select(players: &[&Player]) -> Lineup {
        let mut available: Vec<&Player> = players
            .iter()
            .copied()
            .filter(|player| player.is_available())
            .collect();

        available.sort_by(|a, b| b.rating.cmp(&a.rating).then(a.id.cmp(&b.id)));

        let mut lineup = Lineup::default();

        let keeper_index = available
            .iter()
            .position(|player| player.position.is_goalkeeper())
            .or(if available.is_empty() { None } else { Some(0) });

        if let Some(index) = keeper_index {
            let keeper = available.remove(index);

            lineup.goalkeeper = Some(LineupSlot {
                player_id: keeper.id,
                rating: keeper.rating,
                slot: PlayerPositionType::Goalkeeper,
                on_role: keeper.position.is_goalkeeper(),
            });
        }

        for (position, quota) in FORMATION {
            let mut taken = 0;

            available.retain(|player| {
                if taken < quota && player.position == position {
                    lineup.sector_mut(position).push(LineupSlot {
                        player_id: player.id,
                        rating: player.rating,
                        slot: position,
                        on_role: true,
                    });
                    taken += 1;
                    return false;
                }
                true
            });
        }

        for (position, quota) in FORMATION {
            while lineup.sector_mut(position).len() < quota && !available.is_empty() {
                let filler = available.remove(0);

                lineup.sector_mut(position).push(LineupSlot {
                    player_id: filler.id,
                    rating: filler.rating,
                    slot: position,
                    on_role: false,
                });
            }
        }

        debug!(
            "lineup selected: {} players ({} off-role)",
            lineup.len(),
            lineup.slots().filter(|slot| !slot.on_role).count()
        );

        lineup
    }

    pub fn sector_strengths(lineup: &Lineup) -> SectorStrengths {
        SectorStrengths {
            attack: Self::sector_strength(&lineup.forwards),
            midfield: Self::sector_strength(&lineup.midfielders),
            defense: Self::sector_strength(&lineup.defenders),
            goalkeeping: Self::sector_strength(lineup.goalkeeper.as_slice()),
        }
    }

    /// `round(Σ(rating × weight) / count / 10)`; an empty sector is 50.
    pub fn sector_strength(slots: &[LineupSlot]) -> u8 {
        if slots.is_empty() {
            return EMPTY_SECTOR_STRENGTH;
        }

        let weighted: f32 = slots
            .iter()
            .map(|slot| slot.rating as f32 * slot.weight())
            .sum();

        (weighted / slots.len() as f32 / 10.0).round().clamp(0.0, 100.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::FullName;

    fn player(id: u32, position: PlayerPositionType, rating: u16) -> Player {
        Player::builder()
            .id(id)
            .full_name(FullName::new(format!("P{}", id), "Test".to_string()))
            .position(position)
            .rating(rating)
            .build()
            .unwrap()
    }

    fn roster() -> Vec<Player> {
        let mut players = vec![player(1, PlayerPositionType::Goalkeeper, 600)];

        players.extend((2..=6).map(|id| player(id, PlayerPositionType::Defender, 500 + id as u16)));
        players.extend((7..=10).map(|id| player(id, PlayerPositionType::Midfielder, 600)));
        players.extend((11..=13).map(|id| player(id, PlayerPositionType::Forward, 700)));

        players
    }

    #[test]
    fn test_select_full_formation_on_role() {
        let players = roster();
        let refs: Vec<&Player> = players.iter().collect();

        let lineup = SquadSelector::select(&refs);

        assert_eq!(lineup.len(), 11);
        assert!(lineup.slots().all(|slot| slot.on_role));
        assert_eq!(lineup.goalkeeper.map(|gk| gk.player_id), Some(1));

        // Best four defenders by rating: 6, 5, 4, 3.
        let defenders: Vec<u32> = lineup.defenders.iter().map(|s| s.player_id).collect();
        assert_eq!(defenders, vec![6, 5, 4, 3]);

        // Equal ratings break ties by id.
        let midfielders: Vec<u32> = lineup.midfielders.iter().map(|s| s.player_id).collect();
        assert_eq!(midfielders, vec![7, 8, 9]);
    }

    #[test]
    fn test_goalkeeper_fallback_uses_best_player() {
        let players: Vec<Player> = roster().into_iter().filter(|p| p.id != 1).collect();
        let refs: Vec<&Player> = players.iter().collect();

        let lineup = SquadSelector::select(&refs);
        let keeper = lineup.goalkeeper.unwrap();

        assert!(!keeper.on_role);
        assert_eq!(keeper.rating, 700);
        // 700 * 0.5 / 1 / 10 = 35
        assert_eq!(SquadSelector::sector_strengths(&lineup).goalkeeping, 35);
    }

    #[test]
    fn test_off_role_fill_is_penalized() {
        let players: Vec<Player> = roster()
            .into_iter()
            .filter(|p| p.position != PlayerPositionType::Forward)
            .collect();
        let refs: Vec<&Player> = players.iter().collect();

        let lineup = SquadSelector::select(&refs);

        assert_eq!(lineup.forwards.len(), 2);
        assert!(lineup.forwards.iter().all(|slot| !slot.on_role));

        // Leftovers are the 600 midfielder and the 502 defender:
        // (600 * 0.6 + 502 * 0.6) / 2 / 10 = 33.06
        assert_eq!(SquadSelector::sector_strengths(&lineup).attack, 33);
    }

    #[test]
    fn test_unavailable_players_are_skipped() {
        let mut players = roster();
        players[0].injury_days = 4;
        players[12].suspended_matches = 1;
        let refs: Vec<&Player> = players.iter().collect();

        let lineup = SquadSelector::select(&refs);

        assert!(!lineup.contains(1));
        assert!(!lineup.contains(13));
    }

    #[test]
    fn test_empty_roster_gives_default_sectors() {
        let lineup = SquadSelector::select(&[]);

        assert!(lineup.is_empty());
        assert_eq!(SquadSelector::sector_strengths(&lineup), SectorStrengths::default());
    }
}
