use crate::club::{ClubTactics, MatchHistory, TacticalCard};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const POWER_CAP_MIN: u32 = 5000;
pub const POWER_CAP_MAX: u32 = 20000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubColors {
    pub background: String,
    pub foreground: String,
}

impl Default for ClubColors {
    fn default() -> Self {
        ClubColors {
            background: "#1e272d".to_string(),
            foreground: "#ffffff".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClubFinances {
    pub balance: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Club {
    pub id: u32,
    pub name: String,
    pub league_id: u32,

    pub roster: Vec<u32>,
    pub tactics: ClubTactics,

    /// Rolling ceiling on the summed rating of the roster.
    pub power_cap: u32,

    pub card_inventory: Vec<TacticalCard>,
    pub match_history: MatchHistory,
    pub last_style_review: Option<NaiveDateTime>,

    pub colors: ClubColors,
    pub finance: ClubFinances,
}

impl Club {
    pub fn new(id: u32, name: String, league_id: u32, tactics: ClubTactics, power_cap: u32) -> Self {
        Club {
            id,
            name,
            league_id,
            roster: Vec::new(),
            tactics,
            power_cap: power_cap.clamp(POWER_CAP_MIN, POWER_CAP_MAX),
            card_inventory: Vec::new(),
            match_history: MatchHistory::new(),
            last_style_review: None,
            colors: ClubColors::default(),
            finance: ClubFinances::default(),
        }
    }

    pub fn add_player(&mut self, player_id: u32) -> bool {
        if self.roster.contains(&player_id) {
            return false;
        }

        self.roster.push(player_id);
        true
    }

    pub fn remove_player(&mut self, player_id: u32) -> bool {
        match self.roster.iter().position(|id| *id == player_id) {
            Some(index) => {
                self.roster.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drifts the power cap by an evolution delta, clamped to the band.
    pub fn apply_power_delta(&mut self, delta: i32) {
        self.power_cap =
            (self.power_cap as i64 + delta as i64).clamp(POWER_CAP_MIN as i64, POWER_CAP_MAX as i64) as u32;
    }

    pub fn set_power_cap(&mut self, power_cap: u32) {
        self.power_cap = power_cap.clamp(POWER_CAP_MIN, POWER_CAP_MAX);
    }

    /// Moves a crafted card from the inventory into a free tactics slot.
    pub fn equip_from_inventory(&mut self, card: TacticalCard) -> bool {
        let Some(index) = self.card_inventory.iter().position(|c| *c == card) else {
            return false;
        };

        if !self.tactics.equip(card) {
            return false;
        }

        self.card_inventory.remove(index);
        true
    }

    pub fn unequip_to_inventory(&mut self, card: TacticalCard) -> bool {
        if !self.tactics.unequip(card) {
            return false;
        }

        self.card_inventory.push(card);
        true
    }

    /// Whether a player of `rating` fits under the cap on top of `squad_rating`.
    pub fn can_absorb(&self, squad_rating: u32, rating: u16) -> bool {
        squad_rating + rating as u32 <= self.power_cap
    }
}
