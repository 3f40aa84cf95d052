use crate::r#match::MatchOutcome;
use crate::utils::SimulationRng;
use crate::{PentagonAxis, Player};
use log::debug;

const HIGH_RATING_THRESHOLD: u16 = 850;
const LOW_RATING_THRESHOLD: u16 = 600;
const HIGH_RATING_INERTIA: f32 = 0.15;
const LOW_RATING_INERTIA: f32 = 1.5;

const PERFORMANCE_BASELINE: f32 = 6.0;
const PERFORMANCE_DELTA_SCALE: f32 = 5.0;
const UNUSED_DECAY: f32 = -1.2;

const HOT_PHASE: f32 = 8.0;
const COLD_PHASE: f32 = 5.0;
const PHASE_DRIFT_AXES: usize = 2;

/// How a roster member took part in a resolved fixture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Participation {
    Played(f32),
    Unused,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOutcome {
    pub player_id: u32,
    pub delta: i32,
    pub old_rating: u16,
    pub new_rating: u16,
    pub phase: Option<f32>,
}

/// Halves round towards positive infinity, so -2.5 becomes -2.
fn round_half_up(value: f32) -> i32 {
    (value + 0.5).floor() as i32
}

pub struct PlayerEvolutionCalculator;

impl PlayerEvolutionCalculator {
    /// High-rated players move slowly, low-rated players move fast.
    pub fn inertia(rating: u16) -> f32 {
        if rating > HIGH_RATING_THRESHOLD {
            HIGH_RATING_INERTIA
        } else if rating < LOW_RATING_THRESHOLD {
            LOW_RATING_INERTIA
        } else {
            1.0
        }
    }

    pub fn base_delta(rating: u16, participation: Participation) -> i32 {
        let inertia = Self::inertia(rating);

        match participation {
            Participation::Played(performance) => {
                round_half_up((performance - PERFORMANCE_BASELINE) * PERFORMANCE_DELTA_SCALE * inertia)
            }
            Participation::Unused => round_half_up(UNUSED_DECAY * inertia),
        }
    }

    /// Multiplies the badge modifiers in sequence, then rounds once.
    pub fn apply_badges(delta: i32, player: &Player) -> i32 {
        let scaled = player
            .badges
            .evolution_multipliers()
            .iter()
            .fold(delta as f32, |acc, multiplier| acc * multiplier);

        round_half_up(scaled)
    }

    /// Score for a starter with no recorded duel involvement: 5.5–6.5 plus a
    /// result bonus.
    pub fn synthesized_performance(outcome: MatchOutcome, rng: &mut SimulationRng) -> f32 {
        let result_bonus = match outcome {
            MatchOutcome::Win => 0.5,
            MatchOutcome::Draw => 0.0,
            MatchOutcome::Loss => -0.5,
        };

        (5.5 + rng.range_f32(0.0, 1.0) + result_bonus).clamp(0.0, 10.0)
    }

    /// Applies one fixture's evolution to `player` and returns the delta the
    /// owning club's power cap must absorb.
    pub fn evolve(
        player: &mut Player,
        participation: Participation,
        rng: &mut SimulationRng,
    ) -> EvolutionOutcome {
        let old_rating = player.rating;

        let delta = Self::apply_badges(Self::base_delta(old_rating, participation), player);

        if let Participation::Played(performance) = participation {
            player.statistics.record_performance(performance.clamp(0.0, 10.0));
            Self::apply_phase_drift(player, rng);
        }

        player.set_rating(old_rating as i32 + delta);

        debug!(
            "evolution: player {} {} -> {} (delta {})",
            player.id, old_rating, player.rating, delta
        );

        EvolutionOutcome {
            player_id: player.id,
            delta,
            old_rating,
            new_rating: player.rating,
            phase: player.statistics.phase(),
        }
    }

    fn apply_phase_drift(player: &mut Player, rng: &mut SimulationRng) {
        let Some(phase) = player.statistics.phase() else {
            return;
        };

        let hot = phase > HOT_PHASE;
        let cold = phase < COLD_PHASE;

        if !hot && !cold {
            return;
        }

        for index in rng.distinct_indexes(PentagonAxis::ALL.len(), PHASE_DRIFT_AXES) {
            let axis = PentagonAxis::ALL[index];

            if hot {
                player.pentagon.increase(axis);
            } else {
                player.pentagon.decrease(axis);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::FullName;
    use crate::{Pentagon, PlayerBadges, PlayerPositionType, ProfileBadge, SpecialBadge, TechnicalBadge};

    fn player(rating: u16, potential: u16) -> Player {
        Player::builder()
            .id(1)
            .full_name(FullName::new("A".to_string(), "B".to_string()))
            .position(PlayerPositionType::Midfielder)
            .pentagon(Pentagon::uniform(50))
            .rating(rating)
            .potential(potential)
            .build()
            .unwrap()
    }

    #[test]
    fn test_inertia_bands() {
        assert_eq!(PlayerEvolutionCalculator::inertia(900), 0.15);
        assert_eq!(PlayerEvolutionCalculator::inertia(850), 1.0);
        assert_eq!(PlayerEvolutionCalculator::inertia(600), 1.0);
        assert_eq!(PlayerEvolutionCalculator::inertia(599), 1.5);
    }

    #[test]
    fn test_high_rating_delta_is_dampened() {
        let mut rng = SimulationRng::from_seed(1);
        let mut star = player(900, 950);

        let outcome =
            PlayerEvolutionCalculator::evolve(&mut star, Participation::Played(9.5), &mut rng);

        // (9.5 - 6) * 5 * 0.15 = 2.625
        assert_eq!(outcome.delta, 3);
        assert_eq!(star.rating, 903);
    }

    #[test]
    fn test_unused_decay() {
        assert_eq!(PlayerEvolutionCalculator::base_delta(500, Participation::Unused), -2);
        assert_eq!(PlayerEvolutionCalculator::base_delta(700, Participation::Unused), -1);
        assert_eq!(PlayerEvolutionCalculator::base_delta(900, Participation::Unused), 0);
    }

    #[test]
    fn test_half_deltas_round_up() {
        // (5.5 - 6) * 5 = -2.5
        assert_eq!(PlayerEvolutionCalculator::base_delta(700, Participation::Played(5.5)), -2);
        // (6.5 - 6) * 5 = 2.5
        assert_eq!(PlayerEvolutionCalculator::base_delta(700, Participation::Played(6.5)), 3);
        // (5.9 - 6) * 5 * 1.5 = -0.75
        assert_eq!(PlayerEvolutionCalculator::base_delta(500, Participation::Played(5.9)), -1);
    }

    #[test]
    fn test_badges_multiply_in_sequence_then_round() {
        let mut badged = player(700, 900);
        badged.badges = PlayerBadges {
            technical: Some(TechnicalBadge::Playmaker),
            profile: Some(ProfileBadge::Leader),
            special: Some(SpecialBadge::Legend),
        };

        // 10 * 1.05 * 1.10 * 1.20 = 13.86
        assert_eq!(PlayerEvolutionCalculator::apply_badges(10, &badged), 14);

        badged.badges.profile = Some(ProfileBadge::HotHead);
        badged.badges.special = None;

        // 10 * 1.05 * 0.90 = 9.45
        assert_eq!(PlayerEvolutionCalculator::apply_badges(10, &badged), 9);
    }

    #[test]
    fn test_rating_never_exceeds_potential() {
        let mut rng = SimulationRng::from_seed(2);
        let mut prospect = player(590, 600);

        PlayerEvolutionCalculator::evolve(&mut prospect, Participation::Played(10.0), &mut rng);

        assert_eq!(prospect.rating, 600);
    }

    #[test]
    fn test_rating_bounds_hold_over_many_cycles() {
        let mut rng = SimulationRng::from_seed(3);
        let mut players: Vec<Player> = (0..20)
            .map(|i| player(50 * i as u16, 50 * i as u16 + 100))
            .collect();

        for cycle in 0..500 {
            for player in players.iter_mut() {
                let participation = if cycle % 4 == 0 {
                    Participation::Unused
                } else {
                    Participation::Played(rng.range_f32(0.0, 10.0))
                };

                PlayerEvolutionCalculator::evolve(player, participation, &mut rng);

                assert!(player.rating <= player.potential.min(1000));
                assert!(player.pentagon.power <= 100);
            }
        }
    }

    #[test]
    fn test_hot_phase_lifts_two_axes() {
        let mut rng = SimulationRng::from_seed(4);
        let mut hot = player(700, 900);

        for _ in 0..3 {
            PlayerEvolutionCalculator::evolve(&mut hot, Participation::Played(9.0), &mut rng);
        }

        // Every evolve with phase > 8 adds two points across the pentagon.
        assert_eq!(hot.pentagon.total(), 250 + 6);
    }

    #[test]
    fn test_cold_phase_drops_two_axes() {
        let mut rng = SimulationRng::from_seed(4);
        let mut cold = player(700, 900);

        PlayerEvolutionCalculator::evolve(&mut cold, Participation::Played(3.0), &mut rng);

        assert_eq!(cold.pentagon.total(), 250 - 2);
    }

    #[test]
    fn test_synthesized_performance_range() {
        let mut rng = SimulationRng::from_seed(5);

        for _ in 0..100 {
            let win = PlayerEvolutionCalculator::synthesized_performance(MatchOutcome::Win, &mut rng);
            let loss = PlayerEvolutionCalculator::synthesized_performance(MatchOutcome::Loss, &mut rng);

            assert!((6.0..7.0).contains(&win));
            assert!((5.0..6.0).contains(&loss));
        }
    }
}
