use crate::club::{Club, TacticalCard};
use crate::cup::{BracketBuilder, Cup};
use crate::league::League;
use crate::world::{
    LookupError, NotificationFeed, NotificationKind, Production, SeasonPhase,
};
use crate::{Player, SimulationSettings};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorldStatus {
    /// Pre-season: advancing a day does nothing.
    Lobby,
    Active,
}

/// The whole persistent game world. Advancing a day takes one snapshot and
/// returns a new one; the previous value is never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    pub date: NaiveDateTime,
    pub season_start: NaiveDate,
    pub status: WorldStatus,
    pub current_round: u32,

    pub leagues: Vec<League>,
    pub cups: Vec<Cup>,
    pub clubs: BTreeMap<u32, Club>,
    pub players: BTreeMap<u32, Player>,
    pub free_agents: Vec<u32>,

    pub transfer_window_open: bool,
    pub human_club_id: Option<u32>,

    pub productions: Vec<Production>,
    pub next_production_id: u32,
    pub notifications: NotificationFeed,

    pub settings: SimulationSettings,
}

impl WorldState {
    pub fn new(date: NaiveDate, settings: SimulationSettings) -> Self {
        WorldState {
            date: date.and_time(NaiveTime::MIN),
            season_start: date,
            status: WorldStatus::Lobby,
            current_round: 0,
            leagues: Vec::new(),
            cups: settings.cups.iter().map(Cup::new).collect(),
            clubs: BTreeMap::new(),
            players: BTreeMap::new(),
            free_agents: Vec::new(),
            transfer_window_open: true,
            human_club_id: None,
            productions: Vec::new(),
            next_production_id: 1,
            notifications: NotificationFeed::new(),
            settings,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == WorldStatus::Active
    }

    /// Days since the season started.
    pub fn season_day(&self) -> u32 {
        (self.date.date() - self.season_start).num_days().max(0) as u32
    }

    /// Leaves the lobby: schedules every league from today and clears the cups.
    pub fn start_season(&mut self) {
        self.status = WorldStatus::Active;
        self.season_start = self.date.date();
        self.current_round = 0;
        self.transfer_window_open = true;

        let first_fixture_date =
            self.season_start + Duration::days(self.settings.first_fixture_day as i64);

        for league in self.leagues.iter_mut() {
            league.schedule_season(first_fixture_date, &self.settings);
        }

        for cup in self.cups.iter_mut() {
            cup.reset();
        }

        info!(
            "🏁 season started on {} with {} leagues and {} cups",
            self.season_start,
            self.leagues.len(),
            self.cups.len()
        );
    }

    // ========== LOOKUPS ==========

    pub fn club(&self, id: u32) -> Result<&Club, LookupError> {
        self.clubs.get(&id).ok_or(LookupError::ClubNotFound(id))
    }

    pub fn club_mut(&mut self, id: u32) -> Result<&mut Club, LookupError> {
        self.clubs.get_mut(&id).ok_or(LookupError::ClubNotFound(id))
    }

    pub fn player(&self, id: u32) -> Result<&Player, LookupError> {
        self.players.get(&id).ok_or(LookupError::PlayerNotFound(id))
    }

    pub fn player_mut(&mut self, id: u32) -> Result<&mut Player, LookupError> {
        self.players.get_mut(&id).ok_or(LookupError::PlayerNotFound(id))
    }

    pub fn league(&self, id: u32) -> Result<&League, LookupError> {
        self.leagues
            .iter()
            .find(|league| league.id == id)
            .ok_or(LookupError::LeagueNotFound(id))
    }

    pub fn league_mut(&mut self, id: u32) -> Result<&mut League, LookupError> {
        self.leagues
            .iter_mut()
            .find(|league| league.id == id)
            .ok_or(LookupError::LeagueNotFound(id))
    }

    pub fn cup(&self, id: u32) -> Result<&Cup, LookupError> {
        self.cups
            .iter()
            .find(|cup| cup.id == id)
            .ok_or(LookupError::CupNotFound(id))
    }

    pub fn cup_mut(&mut self, id: u32) -> Result<&mut Cup, LookupError> {
        self.cups
            .iter_mut()
            .find(|cup| cup.id == id)
            .ok_or(LookupError::CupNotFound(id))
    }

    /// Resolvable roster members of a club; dangling ids are skipped.
    pub fn roster(&self, club_id: u32) -> Vec<&Player> {
        self.club(club_id)
            .map(|club| {
                club.roster
                    .iter()
                    .filter_map(|id| self.players.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Sum of roster ratings.
    pub fn squad_rating(&self, club_id: u32) -> u32 {
        self.roster(club_id)
            .iter()
            .map(|player| player.rating as u32)
            .sum()
    }

    pub fn is_human_club(&self, club_id: u32) -> bool {
        self.human_club_id == Some(club_id)
    }

    // ========== SEASON CURSOR ==========

    pub fn league_rounds(&self) -> u32 {
        self.leagues
            .iter()
            .map(|league| league.total_rounds())
            .max()
            .unwrap_or(0)
    }

    /// Clubs a cup will draw once the league phase ends.
    pub fn cup_entrants(&self, cup: &Cup) -> Vec<u32> {
        let (from, to) = cup.qualifying_positions;

        self.leagues
            .iter()
            .flat_map(|league| league.table.clubs_in_positions(from, to))
            .collect()
    }

    /// Stage count per cup, known before the cups are seeded.
    pub fn cup_stage_counts(&self) -> Vec<u32> {
        self.cups
            .iter()
            .map(|cup| {
                if cup.is_seeded() {
                    cup.total_stages()
                } else {
                    BracketBuilder::stage_count(self.cup_entrants(cup).len())
                }
            })
            .collect()
    }

    pub fn phase_for_round(&self, round: u32) -> SeasonPhase {
        SeasonPhase::for_round(round, self.league_rounds(), &self.cup_stage_counts())
    }

    pub fn phase(&self) -> SeasonPhase {
        self.phase_for_round(self.current_round)
    }

    // ========== PRODUCTIONS & NOTIFICATIONS ==========

    /// Starts crafting `card` for a club; it lands in the inventory once the
    /// production time has passed.
    pub fn queue_production(&mut self, club_id: u32, card: TacticalCard) -> Result<u32, LookupError> {
        self.club(club_id)?;

        let id = self.next_production_id;
        self.next_production_id += 1;

        self.productions.push(Production {
            id,
            club_id,
            card,
            completes_at: self.date + Duration::days(card.production_days() as i64),
        });

        Ok(id)
    }

    pub fn notify(&mut self, kind: NotificationKind, message: String) {
        self.notifications.push(self.date, kind, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::ClubTactics;
    use crate::shared::FullName;
    use crate::{PlayerClubContract, PlayerPositionType};

    fn world() -> WorldState {
        let mut world = WorldState::new(
            NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
            SimulationSettings::default(),
        );

        for club_id in 1..=4 {
            let mut club = Club::new(club_id, format!("Club {}", club_id), 1, ClubTactics::default(), 8000);

            for index in 0..2 {
                let player_id = club_id * 10 + index;
                let player = Player::builder()
                    .id(player_id)
                    .full_name(FullName::new("P".to_string(), player_id.to_string()))
                    .position(PlayerPositionType::Midfielder)
                    .rating(500)
                    .contract(PlayerClubContract::new(club_id, 1000))
                    .build()
                    .unwrap();

                club.add_player(player_id);
                world.players.insert(player_id, player);
            }

            world.clubs.insert(club_id, club);
        }

        world.leagues.push(League::new(1, "League".to_string(), vec![1, 2, 3, 4]));
        world
    }

    #[test]
    fn test_lookups_report_missing_ids() {
        let world = world();

        assert!(world.club(1).is_ok());
        assert_eq!(world.club(99).unwrap_err(), LookupError::ClubNotFound(99));
        assert_eq!(world.player(99).unwrap_err(), LookupError::PlayerNotFound(99));
        assert_eq!(world.league(2).unwrap_err(), LookupError::LeagueNotFound(2));
        assert_eq!(world.cup(9).unwrap_err(), LookupError::CupNotFound(9));
    }

    #[test]
    fn test_squad_rating_skips_dangling_ids() {
        let mut world = world();
        world.club_mut(1).unwrap().add_player(999);

        assert_eq!(world.roster(1).len(), 2);
        assert_eq!(world.squad_rating(1), 1000);
        assert_eq!(world.squad_rating(42), 0);
    }

    #[test]
    fn test_start_season_schedules_leagues() {
        let mut world = world();
        world.start_season();

        assert!(world.is_active());
        assert_eq!(world.season_day(), 0);
        assert_eq!(world.league_rounds(), 6);
        assert_eq!(world.leagues[0].fixtures.len(), 12);

        let first = world.leagues[0].round_fixtures(1).next().unwrap();
        assert_eq!(first.kickoff.date(), NaiveDate::from_ymd_opt(2024, 8, 3).unwrap());
    }

    #[test]
    fn test_cup_stage_counts_from_qualifying_positions() {
        let world = world();

        // Champions Cup takes places 1-4 (4 clubs, 2 stages); the Challenge
        // Cup takes 5-8 from a four-club league, so it is empty.
        assert_eq!(world.cup_stage_counts(), vec![2, 0]);
        assert_eq!(
            world.phase_for_round(7),
            SeasonPhase::CupStages { cup_index: 0, stage: 0 }
        );
        assert_eq!(world.phase_for_round(9), SeasonPhase::SeasonEnd);
    }

    #[test]
    fn test_queue_production() {
        let mut world = world();

        let id = world.queue_production(1, TacticalCard::WildCard).unwrap();
        assert_eq!(id, 1);
        assert_eq!(
            world.productions[0].completes_at.date(),
            NaiveDate::from_ymd_opt(2024, 8, 3).unwrap()
        );

        assert!(world.queue_production(77, TacticalCard::IronWall).is_err());
    }
}
