use crate::club::{
    Pentagon, Player, PlayerBadges, PlayerClubContract, PlayerPositionType, PlayerStatistics,
};
use crate::shared::FullName;

// Builder for Player
#[derive(Default)]
pub struct PlayerBuilder {
    id: Option<u32>,
    full_name: Option<FullName>,
    position: Option<PlayerPositionType>,
    pentagon: Option<Pentagon>,
    rating: Option<u16>,
    potential: Option<u16>,
    badges: Option<PlayerBadges>,
    contract: Option<PlayerClubContract>,
    statistics: Option<PlayerStatistics>,
    satisfaction: Option<u8>,
}

impl PlayerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn full_name(mut self, full_name: FullName) -> Self {
        self.full_name = Some(full_name);
        self
    }

    pub fn position(mut self, position: PlayerPositionType) -> Self {
        self.position = Some(position);
        self
    }

    pub fn pentagon(mut self, pentagon: Pentagon) -> Self {
        self.pentagon = Some(pentagon);
        self
    }

    pub fn rating(mut self, rating: u16) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn potential(mut self, potential: u16) -> Self {
        self.potential = Some(potential);
        self
    }

    pub fn badges(mut self, badges: PlayerBadges) -> Self {
        self.badges = Some(badges);
        self
    }

    pub fn contract(mut self, contract: PlayerClubContract) -> Self {
        self.contract = Some(contract);
        self
    }

    pub fn statistics(mut self, statistics: PlayerStatistics) -> Self {
        self.statistics = Some(statistics);
        self
    }

    pub fn satisfaction(mut self, satisfaction: u8) -> Self {
        self.satisfaction = Some(satisfaction);
        self
    }

    /// Potential defaults to the rating and is raised to it if lower, so a
    /// built player always satisfies `rating <= potential`.
    pub fn build(self) -> Result<Player, String> {
        let rating = self.rating.ok_or("rating is required")?;
        let potential = self.potential.unwrap_or(rating).max(rating);

        let mut player = Player {
            id: self.id.ok_or("id is required")?,
            full_name: self.full_name.ok_or("full_name is required")?,
            position: self.position.ok_or("position is required")?,
            pentagon: self.pentagon.unwrap_or_default(),
            rating,
            potential,
            badges: self.badges.unwrap_or_default(),
            contract: self.contract.unwrap_or_default(),
            statistics: self.statistics.unwrap_or_default(),
            satisfaction: self.satisfaction.unwrap_or(60),
            injury_days: 0,
            suspended_matches: 0,
        };

        player.set_rating(rating as i32);

        Ok(player)
    }
}
