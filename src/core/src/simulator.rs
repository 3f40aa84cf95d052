use crate::club::{ClubAi, ClubUpkeepResult, MatchHistoryItem};
use crate::r#match::{MatchEngine, MatchEventKind, MatchResult, MatchSquad};
use crate::transfers::TransferMarket;
use crate::utils::{Logging, SimulationRng};
use crate::world::{LookupError, NotificationKind, SeasonPhase, WorldState, WorldStatus};
use crate::{EvolutionOutcome, Participation, PlayerEvolutionCalculator};
use chrono::{Duration, NaiveDateTime, NaiveTime};
use log::{debug, info, warn};

pub const INJURY_DAYS_MIN: u32 = 3;
pub const INJURY_DAYS_MAX: u32 = 10;
pub const SAFETY_NET_INTERVAL_DAYS: u32 = 7;

const STARTER_SATISFACTION: i16 = 3;
const UNUSED_SATISFACTION: i16 = -2;
const RED_CARD_SUSPENSION: u8 = 1;

pub struct SimulationResult {
    pub date: NaiveDateTime,
    pub season_day: u32,
    pub is_fixture_day: bool,
    /// Competition phase resolved today, if any.
    pub phase: Option<SeasonPhase>,
    pub match_results: Vec<MatchResult>,
    pub evolutions: Vec<EvolutionOutcome>,
    pub upkeep: Vec<(u32, ClubUpkeepResult)>,
    pub season_finished: bool,
}

impl SimulationResult {
    pub fn new(date: NaiveDateTime, season_day: u32) -> Self {
        SimulationResult {
            date,
            season_day,
            is_fixture_day: false,
            phase: None,
            match_results: Vec::new(),
            evolutions: Vec::new(),
            upkeep: Vec::new(),
            season_finished: false,
        }
    }

    pub fn has_match_results(&self) -> bool {
        !self.match_results.is_empty()
    }
}

pub struct FootballSimulator;

impl FootballSimulator {
    /// Advances the world by one day.
    ///
    /// The input snapshot is never touched: the returned world is a fresh
    /// copy with the whole day applied. A world in the lobby comes back
    /// unchanged.
    pub fn simulate(world: &WorldState, rng: &mut SimulationRng) -> (WorldState, SimulationResult) {
        if world.status == WorldStatus::Lobby {
            debug!("world is in the lobby, nothing to simulate");
            return (
                world.clone(),
                SimulationResult::new(world.date, world.season_day()),
            );
        }

        let mut next = world.clone();

        let result = Logging::estimate_result(|| Self::advance(&mut next, rng), "simulate day");

        (next, result)
    }

    fn advance(world: &mut WorldState, rng: &mut SimulationRng) -> SimulationResult {
        // Phase 1: calendar
        world.date += Duration::days(1);

        let day = world.season_day();
        let mut result = SimulationResult::new(world.date, day);

        result.is_fixture_day = world.settings.is_fixture_day(day);

        if result.is_fixture_day {
            let next_phase = world.phase_for_round(world.current_round + 1);

            if !next_phase.is_season_end() {
                world.current_round += 1;
                result.phase = Some(next_phase);
            }
        }

        // The window shuts on fixture days, except on the first round and
        // once the competitions are over.
        world.transfer_window_open = !result.is_fixture_day
            || result.phase.is_none()
            || result.phase == Some(SeasonPhase::LeagueRounds { round: 1 });

        info!(
            "📆 day {} ({}), round {}, window {}",
            day,
            world.date.date(),
            world.current_round,
            if world.transfer_window_open { "open" } else { "closed" }
        );

        // Phase 2: injuries
        Self::recover_injuries(world);

        // Phase 3: productions
        Self::complete_productions(world);

        // Phase 4: automated clubs
        let club_ids: Vec<u32> = world.clubs.keys().copied().collect();

        for club_id in club_ids {
            if world.is_human_club(club_id) {
                continue;
            }

            match ClubAi::upkeep(world, club_id, rng) {
                Ok(upkeep) => result.upkeep.push((club_id, upkeep)),
                Err(error) => warn!("upkeep skipped: {}", error),
            }
        }

        // Phase 5: fixtures
        if let Some(phase) = result.phase {
            let match_results = match phase {
                SeasonPhase::LeagueRounds { round } => Self::play_league_round(world, round, rng),
                SeasonPhase::CupStages { cup_index, stage } => {
                    Self::play_cup_stage(world, cup_index, stage, rng)
                }
                SeasonPhase::SeasonEnd => Vec::new(),
            };

            for match_result in &match_results {
                Self::apply_result(world, match_result, rng, &mut result.evolutions);
            }

            Self::notify_results(world, phase, &match_results);

            match phase {
                SeasonPhase::LeagueRounds { round } => Self::announce_champions(world, round),
                SeasonPhase::CupStages { cup_index, .. } => Self::crown_cup(world, cup_index),
                SeasonPhase::SeasonEnd => {}
            }

            result.match_results = match_results;
        }

        // Phase 6: weekly safety net
        if day > 0 && day % SAFETY_NET_INTERVAL_DAYS == 0 {
            Self::apply_safety_net(world);
        }

        // Phase 7: season end
        if day >= world.settings.season_days {
            Self::finish_season(world);
            result.season_finished = true;
        }

        result
    }

    // ========== DAILY UPKEEP ==========

    fn recover_injuries(world: &mut WorldState) {
        for player in world.players.values_mut() {
            if player.recover_injury_day() {
                debug!("player {} recovered from injury", player.id);
            }
        }
    }

    fn complete_productions(world: &mut WorldState) {
        let now = world.date;

        let (completed, pending) = std::mem::take(&mut world.productions)
            .into_iter()
            .partition::<Vec<_>, _>(|production| production.is_complete(now));

        world.productions = pending;

        for production in completed {
            let automated = !world.is_human_club(production.club_id);

            let Ok(club) = world.club_mut(production.club_id) else {
                warn!("production {} dropped: club {} missing", production.id, production.club_id);
                continue;
            };

            club.card_inventory.push(production.card);

            // Automated clubs equip straight away while a slot is free.
            if automated && club.equip_from_inventory(production.card) {
                debug!("{} equipped {:?}", club.name, production.card);
            }

            let message = format!("{} finished crafting {:?}", club.name, production.card);

            world.notify(NotificationKind::ProductionComplete, message);
        }
    }

    // ========== FIXTURES ==========

    fn match_squad(world: &WorldState, club_id: u32) -> Result<MatchSquad, LookupError> {
        let club = world.club(club_id)?;
        let players = world.roster(club_id);

        Ok(MatchSquad::from_club(club, &players))
    }

    /// A fixture whose clubs cannot be resolved ends 0-0 with no events.
    fn play_fixture(world: &WorldState, home: u32, away: u32, rng: &mut SimulationRng) -> MatchResult {
        let squads = Self::match_squad(world, home).and_then(|home_squad| {
            Self::match_squad(world, away).map(|away_squad| (home_squad, away_squad))
        });

        match squads {
            Ok((home_squad, away_squad)) => Logging::estimate_result(
                || MatchEngine::play(&home_squad, &away_squad, rng),
                "play fixture",
            ),
            Err(error) => {
                warn!("fixture {} vs {} played as empty result: {}", home, away, error);
                MatchResult::empty(home, away)
            }
        }
    }

    fn play_league_round(world: &mut WorldState, round: u32, rng: &mut SimulationRng) -> Vec<MatchResult> {
        let due: Vec<(u32, String, u32, u32)> = world
            .leagues
            .iter()
            .flat_map(|league| {
                league
                    .round_fixtures(round)
                    .filter(|fixture| !fixture.is_finished())
                    .map(|fixture| {
                        (league.id, fixture.id.clone(), fixture.home_club_id, fixture.away_club_id)
                    })
            })
            .collect();

        info!("⚽ league round {}: {} fixtures", round, due.len());

        let mut results = Vec::with_capacity(due.len());

        for (league_id, fixture_id, home, away) in due {
            if let Ok(league) = world.league_mut(league_id) {
                league.kick_off(&fixture_id);
            }

            let match_result = Self::play_fixture(world, home, away, rng);

            match world.league_mut(league_id) {
                Ok(league) => {
                    league.record_result(&fixture_id, match_result.clone());
                }
                Err(error) => warn!("result of {} not recorded: {}", fixture_id, error),
            }

            results.push(match_result);
        }

        results
    }

    fn play_cup_stage(
        world: &mut WorldState,
        cup_index: usize,
        stage: u32,
        rng: &mut SimulationRng,
    ) -> Vec<MatchResult> {
        let Some(cup) = world.cups.get(cup_index) else {
            return Vec::new();
        };

        if stage == 0 && !cup.is_seeded() {
            let entrants = world.cup_entrants(cup);

            if let Some(cup) = world.cups.get_mut(cup_index) {
                cup.seed(entrants, rng);
            }
        }

        let kickoff_time = NaiveTime::from_hms_opt(world.settings.kickoff_hour(0), 0, 0)
            .unwrap_or(NaiveTime::MIN);
        let kickoff = world.date.date().and_time(kickoff_time);

        let Some(cup) = world.cups.get_mut(cup_index) else {
            return Vec::new();
        };

        if !cup.ensure_stage(stage, kickoff) {
            warn!("{}: stage {} could not be built", cup.name, stage + 1);
            return Vec::new();
        }

        info!("🏆 {} stage {}", cup.name, stage + 1);

        let due: Vec<(String, u32, u32)> = cup
            .stage(stage)
            .map(|cup_stage| {
                cup_stage
                    .fixtures
                    .iter()
                    .filter(|fixture| !fixture.is_finished())
                    .map(|fixture| (fixture.id.clone(), fixture.home_club_id, fixture.away_club_id))
                    .collect()
            })
            .unwrap_or_default();

        let mut results = Vec::with_capacity(due.len());

        for (fixture_id, home, away) in due {
            if let Some(cup) = world.cups.get_mut(cup_index) {
                cup.kick_off(stage, &fixture_id);
            }

            let match_result = Self::play_fixture(world, home, away, rng);

            let Some(cup) = world.cups.get_mut(cup_index) else {
                break;
            };

            cup.record_result(stage, &fixture_id, match_result, rng);

            // The stored result may have been settled on penalties.
            if let Some(stored) = cup
                .stage(stage)
                .and_then(|cup_stage| cup_stage.fixtures.iter().find(|f| f.id == fixture_id))
                .and_then(|fixture| fixture.result())
            {
                results.push(stored.clone());
            }
        }

        results
    }

    // ========== RESULTS ==========

    /// Standings are handled by the competition; this applies the result to
    /// players and clubs.
    fn apply_result(
        world: &mut WorldState,
        result: &MatchResult,
        rng: &mut SimulationRng,
        evolutions: &mut Vec<EvolutionOutcome>,
    ) {
        let date = world.date;

        for (club_id, rival_id) in [
            (result.home_club_id, result.away_club_id),
            (result.away_club_id, result.home_club_id),
        ] {
            let Ok(club) = world.club(club_id) else {
                continue;
            };

            let roster = club.roster.clone();
            let outcome = result.outcome_for(club_id);
            let lineup = result.lineup(club_id);

            let mut power_delta = 0;

            for player_id in roster {
                let Ok(player) = world.player_mut(player_id) else {
                    continue;
                };

                let started = lineup.contains(&player_id);

                let participation = if started {
                    Participation::Played(match result.performances.get(&player_id) {
                        Some(performance) => *performance,
                        None => PlayerEvolutionCalculator::synthesized_performance(outcome, rng),
                    })
                } else {
                    Participation::Unused
                };

                let evolution = PlayerEvolutionCalculator::evolve(player, participation, rng);
                power_delta += evolution.delta;

                if started {
                    player.change_satisfaction(STARTER_SATISFACTION);
                } else {
                    player.change_satisfaction(UNUSED_SATISFACTION);
                    player.suspended_matches = player.suspended_matches.saturating_sub(1);
                }

                evolutions.push(evolution);
            }

            if let Ok(club) = world.club_mut(club_id) {
                club.apply_power_delta(power_delta);
                club.match_history.add(MatchHistoryItem::new(
                    date,
                    rival_id,
                    result.goals_for(club_id),
                    result.goals_against(club_id),
                ));
            }
        }

        for event in &result.events {
            Self::apply_event(world, &event.kind, rng);
        }
    }

    fn apply_event(world: &mut WorldState, kind: &MatchEventKind, rng: &mut SimulationRng) {
        match *kind {
            MatchEventKind::Goal { scorer_id, assist_id } => {
                if let Ok(scorer) = world.player_mut(scorer_id) {
                    scorer.statistics.goals += 1;
                }

                if let Some(assist_id) = assist_id
                    && let Ok(assist) = world.player_mut(assist_id)
                {
                    assist.statistics.assists += 1;
                }
            }
            MatchEventKind::YellowCard { player_id } => {
                if let Ok(player) = world.player_mut(player_id) {
                    player.statistics.yellow_cards += 1;
                }
            }
            MatchEventKind::RedCard { player_id } => {
                if let Ok(player) = world.player_mut(player_id) {
                    player.statistics.red_cards += 1;
                    player.suspended_matches = RED_CARD_SUSPENSION;
                }
            }
            MatchEventKind::Injury { player_id } => {
                let days = rng.range_u32(INJURY_DAYS_MIN, INJURY_DAYS_MAX) as u8;

                if let Ok(player) = world.player_mut(player_id) {
                    player.injury_days = player.injury_days.max(days);
                }
            }
            _ => {}
        }
    }

    fn notify_results(world: &mut WorldState, phase: SeasonPhase, results: &[MatchResult]) {
        let title = match phase {
            SeasonPhase::LeagueRounds { round } => format!("Round {}", round),
            SeasonPhase::CupStages { cup_index, stage } => match world.cups.get(cup_index) {
                Some(cup) => format!("{} stage {}", cup.name, stage + 1),
                None => format!("Cup stage {}", stage + 1),
            },
            SeasonPhase::SeasonEnd => return,
        };

        if let Some(human_club_id) = world.human_club_id {
            for result in results.iter().filter(|r| {
                r.home_club_id == human_club_id || r.away_club_id == human_club_id
            }) {
                let message = format!("{}: {}", title, Self::describe(world, result));
                world.notify(NotificationKind::MatchResult, message);
            }
        }

        if results.is_empty() {
            return;
        }

        let goals: u32 = results
            .iter()
            .map(|r| r.score.home as u32 + r.score.away as u32)
            .sum();

        let message = format!("{}: {} matches, {} goals", title, results.len(), goals);
        world.notify(NotificationKind::RoundSummary, message);
    }

    fn describe(world: &WorldState, result: &MatchResult) -> String {
        let name = |club_id: u32| {
            world
                .club(club_id)
                .map(|club| club.name.clone())
                .unwrap_or_else(|_| format!("Club {}", club_id))
        };

        format!(
            "{} {}-{} {}{}",
            name(result.home_club_id),
            result.score.home,
            result.score.away,
            name(result.away_club_id),
            if result.decided_on_penalties { " (pens)" } else { "" }
        )
    }

    fn announce_champions(world: &mut WorldState, round: u32) {
        let champions: Vec<(String, u32)> = world
            .leagues
            .iter()
            .filter(|league| league.total_rounds() == round)
            .filter_map(|league| league.champion().map(|club_id| (league.name.clone(), club_id)))
            .collect();

        for (league_name, club_id) in champions {
            let club_name = world
                .club(club_id)
                .map(|club| club.name.clone())
                .unwrap_or_default();

            info!("🥇 {} champions: {}", league_name, club_name);
            world.notify(
                NotificationKind::LeagueChampion,
                format!("{} win {}", club_name, league_name),
            );
        }
    }

    fn crown_cup(world: &mut WorldState, cup_index: usize) {
        let Some(cup) = world.cups.get_mut(cup_index) else {
            return;
        };

        if cup.is_finished() {
            return;
        }

        let Some(winner) = cup.crown() else {
            return;
        };

        let cup_name = cup.name.clone();
        let club_name = world
            .club(winner)
            .map(|club| club.name.clone())
            .unwrap_or_default();

        info!("🏆 {} won by {}", cup_name, club_name);
        world.notify(NotificationKind::CupWinner, format!("{} win the {}", club_name, cup_name));
    }

    // ========== SAFETY NET ==========

    /// Keeps power caps above actual squad strength and tops up clubs that
    /// are short of players or below the aggregate rating floor.
    fn apply_safety_net(world: &mut WorldState) {
        let settings = world.settings.clone();
        let club_ids: Vec<u32> = world.clubs.keys().copied().collect();

        for club_id in club_ids {
            let squad_rating = world.squad_rating(club_id);

            let Ok(club) = world.club_mut(club_id) else {
                continue;
            };

            if squad_rating > club.power_cap {
                club.set_power_cap(squad_rating);
            }

            let roster_len = club.roster.len();

            if roster_len >= settings.safety_net_squad_size
                && squad_rating >= settings.safety_net_rating_floor
            {
                continue;
            }

            let needed = settings.safety_net_squad_size.saturating_sub(roster_len);

            if needed == 0 {
                continue;
            }

            let mut candidates: Vec<(u32, u16)> = world
                .free_agents
                .iter()
                .filter_map(|id| world.players.get(id))
                .map(|player| (player.id, player.rating))
                .collect();

            candidates.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

            let mut signed = 0;

            for (player_id, _) in candidates.into_iter().take(needed) {
                if let Ok(player) = world.player_mut(player_id)
                    && player.rating < settings.safety_net_player_rating
                {
                    player.raise_potential(settings.safety_net_player_rating);
                    player.set_rating(settings.safety_net_player_rating as i32);
                }

                if TransferMarket::assign(world, club_id, player_id).is_ok() {
                    signed += 1;
                }
            }

            let squad_rating = world.squad_rating(club_id);

            if let Ok(club) = world.club_mut(club_id) {
                if squad_rating > club.power_cap {
                    club.set_power_cap(squad_rating);
                }

                let message = format!("Safety net: {} signed {} free agents", club.name, signed);

                warn!("{}", message);
                world.notify(NotificationKind::SafetyNet, message);
            }
        }
    }

    // ========== SEASON END ==========

    fn finish_season(world: &mut WorldState) {
        let champions: Vec<String> = world
            .leagues
            .iter()
            .filter_map(|league| {
                league.table.leader().map(|club_id| {
                    let club_name = world
                        .club(club_id)
                        .map(|club| club.name.clone())
                        .unwrap_or_default();
                    format!("{}: {}", league.name, club_name)
                })
            })
            .chain(world.cups.iter().filter_map(|cup| {
                cup.winner.map(|club_id| {
                    let club_name = world
                        .club(club_id)
                        .map(|club| club.name.clone())
                        .unwrap_or_default();
                    format!("{}: {}", cup.name, club_name)
                })
            }))
            .collect();

        let message = if champions.is_empty() {
            "Season over".to_string()
        } else {
            format!("Season over. {}", champions.join(", "))
        };

        info!("🎉 {}", message);

        world.notify(NotificationKind::SeasonEnd, message);
        world.status = WorldStatus::Lobby;
        world.transfer_window_open = true;
    }
}
