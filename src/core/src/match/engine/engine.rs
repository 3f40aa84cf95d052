use crate::club::ClubTactics;
use crate::r#match::{
    CommentaryGenerator, DuelOutcome, DuelResolver, MatchEvent, MatchEventKind, MatchResult,
    MatchSquad, MatchStats, SAVE_RATIO_THRESHOLD, Score, SectorDescriptor,
};
use crate::utils::{SimulationRng, weighted_sample};
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

pub const MATCH_MINUTES: u8 = 90;
pub const LATE_GAME_MINUTE: u8 = 75;

/// Added to every rating when drawing duel participants so that low-rated
/// players keep a nonzero chance of being involved.
pub const SELECTION_WEIGHT_FLOOR: f32 = 200.0;
pub const DUEL_PARTICIPANTS: usize = 3;

const BASE_INTENSITY: f32 = 0.1;
const INTENSITY_MINUTE_DIVISOR: f32 = 450.0;

const BASE_FOUL_CHANCE: f32 = 0.12;
const AGGRESSIVENESS_BASELINE: f32 = 50.0;
const YELLOW_CARD_CHANCE: f32 = 0.65;
const RED_CARD_CHANCE: f32 = 0.20;
const INJURY_CHANCE: f32 = 0.15;

const MIN_STAMINA: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Home,
    Away,
}

impl Side {
    fn opposite(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// How a foul is punished once it has been whistled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FoulSanction {
    Yellow,
    Red,
    Injury,
    None,
}

#[derive(Debug, Default)]
struct SideState {
    goals: u8,
    shots: u16,
    shots_on_target: u16,
    possession_ticks: u16,
    booked: BTreeSet<u32>,
    /// Sent off or injured; no longer picked for duels.
    unavailable: BTreeSet<u32>,
}

struct MatchContext<'s> {
    home: &'s MatchSquad,
    away: &'s MatchSquad,
    home_state: SideState,
    away_state: SideState,
    events: Vec<MatchEvent>,
    performances: BTreeMap<u32, (f32, u16)>,
}

impl<'s> MatchContext<'s> {
    fn new(home: &'s MatchSquad, away: &'s MatchSquad) -> Self {
        MatchContext {
            home,
            away,
            home_state: SideState::default(),
            away_state: SideState::default(),
            events: Vec::new(),
            performances: BTreeMap::new(),
        }
    }

    fn squad(&self, side: Side) -> &'s MatchSquad {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }

    fn state(&self, side: Side) -> &SideState {
        match side {
            Side::Home => &self.home_state,
            Side::Away => &self.away_state,
        }
    }

    fn state_mut(&mut self, side: Side) -> &mut SideState {
        match side {
            Side::Home => &mut self.home_state,
            Side::Away => &mut self.away_state,
        }
    }

    fn push_event(&mut self, minute: u8, side: Side, kind: MatchEventKind) {
        let club_id = self.squad(side).club_id;
        self.events.push(MatchEvent::new(minute, Some(club_id), kind));
    }

    fn record_performances(&mut self, player_ids: &[u32], score: f32) {
        for player_id in player_ids {
            let entry = self.performances.entry(*player_id).or_insert((0.0, 0));
            entry.0 += score;
            entry.1 += 1;
        }
    }

    fn into_result(self) -> MatchResult {
        let mut events = self.events;

        let commentary = CommentaryGenerator::generate(self.home, self.away, &events);
        events.extend(commentary);
        events.sort_by_key(|event| event.minute);

        let home_possession = (self.home_state.possession_ticks as f32 * 100.0
            / MATCH_MINUTES as f32)
            .round()
            .clamp(0.0, 100.0) as u8;

        MatchResult {
            home_club_id: self.home.club_id,
            away_club_id: self.away.club_id,
            score: Score::new(self.home_state.goals, self.away_state.goals),
            events,
            stats: MatchStats {
                home_possession,
                away_possession: 100 - home_possession,
                home_shots: self.home_state.shots,
                away_shots: self.away_state.shots,
                home_shots_on_target: self.home_state.shots_on_target,
                away_shots_on_target: self.away_state.shots_on_target,
            },
            performances: self
                .performances
                .into_iter()
                .map(|(player_id, (sum, count))| (player_id, sum / count.max(1) as f32))
                .collect(),
            home_lineup: self.home.lineup.player_ids(),
            away_lineup: self.away.lineup.player_ids(),
            decided_on_penalties: false,
        }
    }
}

pub struct MatchEngine;

impl MatchEngine {
    pub fn play(home: &MatchSquad, away: &MatchSquad, rng: &mut SimulationRng) -> MatchResult {
        let mut context = MatchContext::new(home, away);

        for minute in 1..=MATCH_MINUTES {
            Self::play_minute(&mut context, minute, rng);
        }

        let result = context.into_result();

        debug!(
            "match: {} {}-{} {} (possession {}%)",
            home.club_name,
            result.score.home,
            result.score.away,
            away.club_name,
            result.stats.home_possession
        );

        result
    }

    fn play_minute(context: &mut MatchContext, minute: u8, rng: &mut SimulationRng) {
        let home_chance = Self::possession_chance(context.home, context.away, minute);

        let attacking = if rng.chance(home_chance) {
            Side::Home
        } else {
            Side::Away
        };
        let defending = attacking.opposite();

        context.state_mut(attacking).possession_ticks += 1;

        let attacking_squad = context.squad(attacking);
        let defending_squad = context.squad(defending);

        if !rng.chance(Self::event_chance(defending_squad, minute)) {
            return;
        }

        let attackers = Self::pick_participants(
            attacking_squad,
            context.state(attacking),
            false,
            rng,
        );

        if attackers.is_empty() {
            return;
        }

        let defenders =
            Self::pick_participants(defending_squad, context.state(defending), true, rng);

        let duel = DuelResolver::resolve(
            &Self::attack_descriptor(attacking_squad, minute),
            &Self::defense_descriptor(defending_squad, minute),
            rng,
        );

        context.record_performances(&attackers, duel.attacker_score);
        context.record_performances(&defenders, duel.defender_score);

        match duel.outcome {
            DuelOutcome::Goal => {
                let state = context.state_mut(attacking);
                state.goals = state.goals.saturating_add(1);
                state.shots += 1;
                state.shots_on_target += 1;

                context.push_event(
                    minute,
                    attacking,
                    MatchEventKind::Goal {
                        scorer_id: attackers[0],
                        assist_id: attackers.get(1).copied(),
                    },
                );
            }
            DuelOutcome::Save => {
                let on_target = duel.ratio > SAVE_RATIO_THRESHOLD;

                let state = context.state_mut(attacking);
                state.shots += 1;
                if on_target {
                    state.shots_on_target += 1;
                }

                context.push_event(
                    minute,
                    attacking,
                    MatchEventKind::Chance {
                        player_id: attackers[0],
                        on_target,
                    },
                );
            }
            DuelOutcome::Turnover => {
                if let Some(&offender) = defenders.first()
                    && rng.chance(Self::foul_chance(&defending_squad.tactics))
                {
                    Self::resolve_foul(context, minute, defending, offender, attackers[0], rng);
                }
            }
        }
    }

    /// Card severity rolls in sequence: 65% yellow; otherwise 20% red;
    /// otherwise 15% an injury to the fouled player; otherwise the foul stands
    /// alone.
    fn foul_sanction(rng: &mut SimulationRng) -> FoulSanction {
        if rng.chance(YELLOW_CARD_CHANCE) {
            FoulSanction::Yellow
        } else if rng.chance(RED_CARD_CHANCE) {
            FoulSanction::Red
        } else if rng.chance(INJURY_CHANCE) {
            FoulSanction::Injury
        } else {
            FoulSanction::None
        }
    }

    fn resolve_foul(
        context: &mut MatchContext,
        minute: u8,
        offending: Side,
        offender: u32,
        victim: u32,
        rng: &mut SimulationRng,
    ) {
        context.push_event(minute, offending, MatchEventKind::Foul { player_id: offender });

        match Self::foul_sanction(rng) {
            FoulSanction::Yellow => Self::book(context, minute, offending, offender),
            FoulSanction::Red => Self::send_off(context, minute, offending, offender),
            FoulSanction::Injury => {
                let victim_side = offending.opposite();

                context.state_mut(victim_side).unavailable.insert(victim);
                context.push_event(minute, victim_side, MatchEventKind::Injury { player_id: victim });
            }
            FoulSanction::None => {}
        }
    }

    /// A second booking in the same match is a sending off.
    fn book(context: &mut MatchContext, minute: u8, side: Side, player_id: u32) {
        let second_booking = !context.state_mut(side).booked.insert(player_id);

        context.push_event(minute, side, MatchEventKind::YellowCard { player_id });

        if second_booking {
            Self::send_off(context, minute, side, player_id);
        }
    }

    fn send_off(context: &mut MatchContext, minute: u8, side: Side, player_id: u32) {
        context.state_mut(side).unavailable.insert(player_id);
        context.push_event(minute, side, MatchEventKind::RedCard { player_id });
    }

    /// Home share of the ball, weighted by effective midfield.
    pub fn possession_chance(home: &MatchSquad, away: &MatchSquad, minute: u8) -> f32 {
        let home_midfield = Self::effective_midfield(home, minute);
        let away_midfield = Self::effective_midfield(away, minute);

        let total_midfield = home_midfield + away_midfield;

        if total_midfield > 0.0 {
            home_midfield / total_midfield
        } else {
            0.5
        }
    }

    /// Intensity damped by the defending side's play style.
    pub fn event_chance(defending: &MatchSquad, minute: u8) -> f32 {
        Self::intensity(minute) * (1.0 - defending.tactics.play_style.modifiers().tick_reduction)
    }

    /// `0.12 * aggressiveness / 50` for the defending side.
    pub fn foul_chance(tactics: &ClubTactics) -> f32 {
        BASE_FOUL_CHANCE * tactics.aggressiveness as f32 / AGGRESSIVENESS_BASELINE
    }

    /// `0.1 + minute / 450`: play opens up as the match goes on.
    pub fn intensity(minute: u8) -> f32 {
        BASE_INTENSITY + minute as f32 / INTENSITY_MINUTE_DIVISOR
    }

    pub fn stamina(tactics: &ClubTactics, minute: u8) -> f32 {
        (1.0 - minute as f32 * tactics.play_style.modifiers().stamina_drain / 1000.0)
            .max(MIN_STAMINA)
    }

    pub fn late_game_factor(tactics: &ClubTactics, minute: u8) -> f32 {
        if minute <= LATE_GAME_MINUTE {
            return 1.0;
        }

        tactics.mentality.modifiers().late_game * tactics.card_modifier(|m| m.late_game)
    }

    pub fn effective_midfield(squad: &MatchSquad, minute: u8) -> f32 {
        let tactics = &squad.tactics;

        squad.sectors.midfield as f32
            * tactics.play_style.modifiers().midfield
            * tactics.card_modifier(|m| m.midfield)
            * Self::late_game_factor(tactics, minute)
            * tactics.chemistry_factor()
    }

    pub fn attack_descriptor(squad: &MatchSquad, minute: u8) -> SectorDescriptor {
        let tactics = &squad.tactics;

        SectorDescriptor {
            strength: squad.sectors.attack as f32,
            chemistry: tactics.chemistry_factor(),
            form: squad.form,
            stamina: Self::stamina(tactics, minute),
            tactical_bonus: tactics.play_style.modifiers().attack
                * tactics.mentality.modifiers().attack
                * tactics.card_modifier(|m| m.attack)
                * tactics.line_attack_factor()
                * Self::late_game_factor(tactics, minute),
            chaos_ceiling: tactics.chaos_ceiling(),
        }
    }

    /// The back line carries three quarters of the defending strength, the keeper the rest.
    pub fn defense_descriptor(squad: &MatchSquad, minute: u8) -> SectorDescriptor {
        let tactics = &squad.tactics;
        let sectors = &squad.sectors;

        let strength =
            ((sectors.defense as f32 * 3.0 + sectors.goalkeeping as f32) / 4.0).round();

        SectorDescriptor {
            strength,
            chemistry: tactics.chemistry_factor(),
            form: squad.form,
            stamina: Self::stamina(tactics, minute),
            tactical_bonus: tactics.play_style.modifiers().defense
                * tactics.mentality.modifiers().defense
                * tactics.card_modifier(|m| m.defense)
                * tactics.line_defense_factor(),
            chaos_ceiling: tactics.chaos_ceiling(),
        }
    }

    fn pick_participants(
        squad: &MatchSquad,
        state: &SideState,
        include_goalkeeper: bool,
        rng: &mut SimulationRng,
    ) -> Vec<u32> {
        let slots: Vec<_> = if include_goalkeeper {
            squad.lineup.slots().collect()
        } else {
            squad.lineup.outfield().collect()
        };

        let candidates: Vec<(u32, f32)> = slots
            .into_iter()
            .filter(|slot| !state.unavailable.contains(&slot.player_id))
            .map(|slot| (slot.player_id, slot.rating as f32 + SELECTION_WEIGHT_FLOOR))
            .collect();

        weighted_sample(rng, &candidates, DUEL_PARTICIPANTS)
    }
}
