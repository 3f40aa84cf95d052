use crate::club::PlayStyle;
use crate::transfers::TransferMarket;
use crate::utils::SimulationRng;
use crate::world::{LookupError, WorldState};
use log::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClubUpkeepResult {
    pub released: Vec<u32>,
    pub signed: Option<u32>,
    pub style_change: Option<(PlayStyle, PlayStyle)>,
}

/// Daily housekeeping for clubs without a human manager.
pub struct ClubAi;

impl ClubAi {
    pub fn upkeep(
        world: &mut WorldState,
        club_id: u32,
        rng: &mut SimulationRng,
    ) -> Result<ClubUpkeepResult, LookupError> {
        let mut result = ClubUpkeepResult {
            released: Self::release_unhappy(world, club_id, rng)?,
            ..Default::default()
        };

        result.signed = Self::reinforce(world, club_id)?;
        result.style_change = Self::review_style(world, club_id)?;

        Ok(result)
    }

    /// Unhappy players leave with a fixed chance, never below the minimum squad size.
    fn release_unhappy(
        world: &mut WorldState,
        club_id: u32,
        rng: &mut SimulationRng,
    ) -> Result<Vec<u32>, LookupError> {
        let threshold = world.settings.release_satisfaction_threshold;
        let min_squad_size = world.settings.min_squad_size;
        let release_chance = world.settings.release_chance;

        let candidates: Vec<u32> = world
            .roster(club_id)
            .iter()
            .filter(|player| player.satisfaction < threshold)
            .map(|player| player.id)
            .collect();

        let mut released = Vec::new();

        for player_id in candidates {
            if world.club(club_id)?.roster.len() <= min_squad_size {
                break;
            }

            if rng.chance(release_chance) && TransferMarket::release(world, club_id, player_id).is_ok() {
                released.push(player_id);
            }
        }

        Ok(released)
    }

    /// Signs the best free agent that fits under the cap while the window is open.
    fn reinforce(world: &mut WorldState, club_id: u32) -> Result<Option<u32>, LookupError> {
        if !world.transfer_window_open
            || world.club(club_id)?.roster.len() >= world.settings.target_squad_size
        {
            return Ok(None);
        }

        let Some(player_id) = TransferMarket::best_affordable_free_agent(world, club_id) else {
            return Ok(None);
        };

        Ok(TransferMarket::sign(world, club_id, player_id)
            .ok()
            .map(|_| player_id))
    }

    /// After a losing run, switch to a more defensive style. Each run is
    /// reviewed once.
    fn review_style(
        world: &mut WorldState,
        club_id: u32,
    ) -> Result<Option<(PlayStyle, PlayStyle)>, LookupError> {
        let streak_limit = world.settings.losing_streak_for_style_change;
        let club = world.club_mut(club_id)?;

        if club.match_history.losing_streak() < streak_limit {
            return Ok(None);
        }

        let Some(last_match) = club.match_history.last().map(|item| item.date) else {
            return Ok(None);
        };

        if club.last_style_review.is_some_and(|reviewed| reviewed >= last_match) {
            return Ok(None);
        }

        club.last_style_review = Some(last_match);

        let old_style = club.tactics.play_style;
        let new_style = old_style.more_defensive();

        if new_style == old_style {
            return Ok(None);
        }

        club.tactics.play_style = new_style;

        debug!("club {}: style {:?} -> {:?} after losing run", club_id, old_style, new_style);

        Ok(Some((old_style, new_style)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::{Club, ClubTactics, MatchHistoryItem, Mentality};
    use crate::shared::FullName;
    use crate::{Player, PlayerClubContract, PlayerPositionType, SimulationSettings};
    use chrono::{Duration, NaiveDate};

    fn world(roster_size: u32, satisfaction: u8) -> WorldState {
        let mut settings = SimulationSettings::default();
        settings.release_chance = 1.0;

        let mut world = WorldState::new(NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(), settings);
        let mut club = Club::new(1, "AI".to_string(), 1, ClubTactics::default(), 12_000);

        for index in 0..roster_size {
            let id = 100 + index;
            let player = Player::builder()
                .id(id)
                .full_name(FullName::new("P".to_string(), id.to_string()))
                .position(PlayerPositionType::Midfielder)
                .rating(500)
                .satisfaction(satisfaction)
                .contract(PlayerClubContract::new(1, 1000))
                .build()
                .unwrap();

            world.players.insert(id, player);
            club.add_player(id);
        }

        world.clubs.insert(1, club);
        world
    }

    fn add_free_agent(world: &mut WorldState, id: u32, rating: u16) {
        let player = Player::builder()
            .id(id)
            .full_name(FullName::new("F".to_string(), id.to_string()))
            .position(PlayerPositionType::Forward)
            .rating(rating)
            .contract(PlayerClubContract::free_agent(500))
            .build()
            .unwrap();

        world.players.insert(id, player);
        world.free_agents.push(id);
    }

    #[test]
    fn test_release_stops_at_minimum_squad_size() {
        let mut world = world(20, 10);
        world.transfer_window_open = false;

        let result = ClubAi::upkeep(&mut world, 1, &mut SimulationRng::from_seed(1)).unwrap();

        assert_eq!(result.released.len(), 4);
        assert_eq!(world.club(1).unwrap().roster.len(), 16);
        assert_eq!(world.free_agents.len(), 4);
    }

    #[test]
    fn test_happy_players_stay() {
        let mut world = world(20, 80);

        let result = ClubAi::upkeep(&mut world, 1, &mut SimulationRng::from_seed(1)).unwrap();

        assert!(result.released.is_empty());
    }

    #[test]
    fn test_signs_best_affordable_when_short() {
        let mut world = world(16, 80);
        add_free_agent(&mut world, 900, 600);
        add_free_agent(&mut world, 901, 400);
        add_free_agent(&mut world, 902, 900);
        world.club_mut(1).unwrap().set_power_cap(8700);

        let result = ClubAi::upkeep(&mut world, 1, &mut SimulationRng::from_seed(1)).unwrap();

        // 8000 + 900 breaks the 8700 cap; 600 is the best that fits.
        assert_eq!(result.signed, Some(900));
        assert!(world.club(1).unwrap().roster.contains(&900));
    }

    #[test]
    fn test_no_signing_when_window_closed() {
        let mut world = world(16, 80);
        world.transfer_window_open = false;
        add_free_agent(&mut world, 900, 600);

        let result = ClubAi::upkeep(&mut world, 1, &mut SimulationRng::from_seed(1)).unwrap();

        assert_eq!(result.signed, None);
    }

    #[test]
    fn test_losing_streak_switches_style_once() {
        let mut world = world(18, 80);
        let date = world.date;

        {
            let club = world.club_mut(1).unwrap();
            club.tactics = ClubTactics::new(PlayStyle::Pressing, Mentality::Balanced);

            for day in 0..3 {
                club.match_history
                    .add(MatchHistoryItem::new(date + Duration::days(day), 2, 0, 1));
            }
        }

        let mut rng = SimulationRng::from_seed(1);

        let first = ClubAi::upkeep(&mut world, 1, &mut rng).unwrap();
        assert_eq!(first.style_change, Some((PlayStyle::Pressing, PlayStyle::Balanced)));

        let second = ClubAi::upkeep(&mut world, 1, &mut rng).unwrap();
        assert_eq!(second.style_change, None);
        assert_eq!(world.club(1).unwrap().tactics.play_style, PlayStyle::Balanced);
    }

    #[test]
    fn test_missing_club_is_a_lookup_error() {
        let mut world = world(0, 80);

        assert_eq!(
            ClubAi::upkeep(&mut world, 5, &mut SimulationRng::from_seed(1)).unwrap_err(),
            LookupError::ClubNotFound(5)
        );
    }
}
