use crate::club::player::builder::PlayerBuilder;
use crate::club::{
    Pentagon, PlayerBadges, PlayerClubContract, PlayerPositionType, PlayerStatistics,
};
use crate::shared::FullName;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};

pub const PLAYER_MAX_RATING: u16 = 1000;
pub const SATISFACTION_MAX_VALUE: u8 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub full_name: FullName,
    pub position: PlayerPositionType,

    pub pentagon: Pentagon,
    pub rating: u16,
    pub potential: u16,
    pub badges: PlayerBadges,

    pub contract: PlayerClubContract,
    pub statistics: PlayerStatistics,

    pub satisfaction: u8,
    pub injury_days: u8,
    pub suspended_matches: u8,
}

impl Player {
    pub fn builder() -> PlayerBuilder {
        PlayerBuilder::new()
    }

    pub fn club_id(&self) -> Option<u32> {
        self.contract.club_id
    }

    pub fn is_free_agent(&self) -> bool {
        self.contract.is_free_agent()
    }

    pub fn is_injured(&self) -> bool {
        self.injury_days > 0
    }

    pub fn is_available(&self) -> bool {
        !self.is_injured() && self.suspended_matches == 0
    }

    /// Upper bound for `rating`: the potential, never above the global maximum.
    pub fn rating_ceiling(&self) -> u16 {
        self.potential.min(PLAYER_MAX_RATING)
    }

    pub fn set_rating(&mut self, rating: i32) {
        self.rating = rating.clamp(0, self.rating_ceiling() as i32) as u16;
    }

    /// Potential only ever moves up.
    pub fn raise_potential(&mut self, potential: u16) {
        self.potential = self.potential.max(potential.min(PLAYER_MAX_RATING));
    }

    pub fn change_satisfaction(&mut self, delta: i16) {
        self.satisfaction =
            (self.satisfaction as i16 + delta).clamp(0, SATISFACTION_MAX_VALUE as i16) as u8;
    }

    /// Daily injury countdown. Returns `true` on the day the player recovers.
    pub fn recover_injury_day(&mut self) -> bool {
        if self.injury_days == 0 {
            return false;
        }

        self.injury_days -= 1;
        self.injury_days == 0
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "{} ({}, {})",
            self.full_name,
            self.position.get_short_name(),
            self.rating
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(rating: u16, potential: u16) -> Player {
        Player::builder()
            .id(1)
            .full_name(FullName::new("Test".to_string(), "Player".to_string()))
            .position(PlayerPositionType::Midfielder)
            .rating(rating)
            .potential(potential)
            .build()
            .unwrap()
    }

    #[test]
    fn test_set_rating_clamps_to_potential() {
        let mut player = player(500, 600);

        player.set_rating(900);
        assert_eq!(player.rating, 600);

        player.set_rating(-20);
        assert_eq!(player.rating, 0);
    }

    #[test]
    fn test_raise_potential_never_lowers() {
        let mut player = player(500, 600);

        player.raise_potential(550);
        assert_eq!(player.potential, 600);

        player.raise_potential(1200);
        assert_eq!(player.potential, PLAYER_MAX_RATING);
    }

    #[test]
    fn test_injury_recovery_countdown() {
        let mut player = player(500, 600);
        player.injury_days = 2;

        assert!(!player.is_available());
        assert!(!player.recover_injury_day());
        assert!(player.recover_injury_day());
        assert!(player.is_available());
        assert!(!player.recover_injury_day());
    }

    #[test]
    fn test_satisfaction_is_clamped() {
        let mut player = player(500, 600);
        player.satisfaction = 98;

        player.change_satisfaction(10);
        assert_eq!(player.satisfaction, 100);

        player.change_satisfaction(-150);
        assert_eq!(player.satisfaction, 0);
    }
}
