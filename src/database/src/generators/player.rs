use crate::PeopleNamesEntity;
use matchday_core::shared::FullName;
use matchday_core::utils::SimulationRng;
use matchday_core::{
    Pentagon, Player, PlayerBadges, PlayerClubContract, PlayerPositionType, PlayerValueCalculator,
    ProfileBadge, SpecialBadge, TechnicalBadge, PLAYER_MAX_RATING,
};

const RATING_BASE: i32 = 450;
const RATING_PER_REPUTATION: i32 = 4;
const RATING_SPREAD: i32 = 120;
const RATING_MIN: i32 = 200;
const RATING_MAX: i32 = 950;
const POTENTIAL_HEADROOM_MAX: u32 = 150;

const TECHNICAL_BADGE_CHANCE: f32 = 0.3;
const PROFILE_BADGE_CHANCE: f32 = 0.3;
const SPECIAL_BADGE_CHANCE: f32 = 0.05;

const TECHNICAL_BADGES: [TechnicalBadge; 5] = [
    TechnicalBadge::Playmaker,
    TechnicalBadge::Finisher,
    TechnicalBadge::Wall,
    TechnicalBadge::Sweeper,
    TechnicalBadge::Dribbler,
];

const PROFILE_BADGES: [ProfileBadge; 4] = [
    ProfileBadge::Leader,
    ProfileBadge::Professional,
    ProfileBadge::Lazy,
    ProfileBadge::HotHead,
];

pub struct PlayerGenerator {
    people_names_data: PeopleNamesEntity,
    next_id: u32,
}

impl PlayerGenerator {
    pub fn with_people_names(people_names: &PeopleNamesEntity) -> Self {
        PlayerGenerator {
            people_names_data: people_names.clone(),
            next_id: 1,
        }
    }

    /// Rating around the club's reputation: 450 + 4 * reputation, +-120.
    pub fn rating_for_reputation(reputation: u16, rng: &mut SimulationRng) -> u16 {
        let center = RATING_BASE + reputation.min(100) as i32 * RATING_PER_REPUTATION;
        let spread = rng.range_u32(0, (RATING_SPREAD * 2) as u32) as i32 - RATING_SPREAD;

        (center + spread).clamp(RATING_MIN, RATING_MAX) as u16
    }

    pub fn generate(
        &mut self,
        position: PlayerPositionType,
        rating: u16,
        club_id: Option<u32>,
        rng: &mut SimulationRng,
    ) -> Result<Player, String> {
        let id = self.next_id;
        self.next_id += 1;

        let potential = (rating as u32 + rng.range_u32(0, POTENTIAL_HEADROOM_MAX))
            .min(PLAYER_MAX_RATING as u32) as u16;

        let mut player = Player::builder()
            .id(id)
            .full_name(FullName::new(
                self.generate_first_name(rng),
                self.generate_last_name(rng),
            ))
            .position(position)
            .pentagon(Self::generate_pentagon(rating, rng))
            .rating(rating)
            .potential(potential)
            .badges(Self::generate_badges(rng))
            .satisfaction(rng.range_u32(50, 80) as u8)
            .build()?;

        let value = PlayerValueCalculator::calculate(&player);

        player.contract = match club_id {
            Some(club_id) => PlayerClubContract::new(club_id, value),
            None => PlayerClubContract::free_agent(value),
        };

        Ok(player)
    }

    /// Every axis sits near rating / 10.
    fn generate_pentagon(rating: u16, rng: &mut SimulationRng) -> Pentagon {
        let center = (rating / 10) as i32;
        let mut axis = || (center + rng.range_u32(0, 20) as i32 - 10).clamp(1, 100) as u8;

        Pentagon::new(axis(), axis(), axis(), axis(), axis())
    }

    fn generate_badges(rng: &mut SimulationRng) -> PlayerBadges {
        let technical = rng
            .chance(TECHNICAL_BADGE_CHANCE)
            .then(|| TECHNICAL_BADGES[rng.index(TECHNICAL_BADGES.len())]);

        let profile = rng
            .chance(PROFILE_BADGE_CHANCE)
            .then(|| PROFILE_BADGES[rng.index(PROFILE_BADGES.len())]);

        let special = rng.chance(SPECIAL_BADGE_CHANCE).then(|| {
            if rng.chance(0.5) {
                SpecialBadge::Prodigy
            } else {
                SpecialBadge::Legend
            }
        });

        PlayerBadges {
            technical,
            profile,
            special,
        }
    }

    fn generate_first_name(&self, rng: &mut SimulationRng) -> String {
        Self::pick_name(&self.people_names_data.first_names, rng)
    }

    fn generate_last_name(&self, rng: &mut SimulationRng) -> String {
        Self::pick_name(&self.people_names_data.last_names, rng)
    }

    fn pick_name(names: &[String], rng: &mut SimulationRng) -> String {
        if names.is_empty() {
            return String::new();
        }

        names[rng.index(names.len())].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> PeopleNamesEntity {
        PeopleNamesEntity {
            first_names: vec!["Ana".to_string()],
            last_names: vec!["Lima".to_string()],
        }
    }

    #[test]
    fn test_rating_follows_reputation() {
        let mut rng = SimulationRng::from_seed(1);

        for _ in 0..200 {
            let strong = PlayerGenerator::rating_for_reputation(80, &mut rng);
            let weak = PlayerGenerator::rating_for_reputation(10, &mut rng);

            assert!((650..=950).contains(&strong));
            assert!((370..=610).contains(&weak));
        }
    }

    #[test]
    fn test_rating_is_clamped() {
        let mut rng = SimulationRng::from_seed(2);

        for _ in 0..200 {
            let rating = PlayerGenerator::rating_for_reputation(100, &mut rng);
            assert!(rating <= 950);
        }
    }

    #[test]
    fn test_generated_players_get_sequential_ids() {
        let mut rng = SimulationRng::from_seed(3);
        let mut generator = PlayerGenerator::with_people_names(&names());

        let first = generator
            .generate(PlayerPositionType::Goalkeeper, 500, Some(7), &mut rng)
            .unwrap();
        let second = generator
            .generate(PlayerPositionType::Forward, 500, None, &mut rng)
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.club_id(), Some(7));
        assert!(second.is_free_agent());
        assert_eq!(first.full_name.first_name, "Ana");
    }

    #[test]
    fn test_potential_headroom() {
        let mut rng = SimulationRng::from_seed(4);
        let mut generator = PlayerGenerator::with_people_names(&names());

        for _ in 0..100 {
            let player = generator
                .generate(PlayerPositionType::Midfielder, 900, None, &mut rng)
                .unwrap();

            assert_eq!(player.rating, 900);
            assert!((900..=1000).contains(&player.potential));
            assert!(player.contract.value > 0);
        }
    }
}
