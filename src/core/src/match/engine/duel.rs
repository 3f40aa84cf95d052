use crate::utils::SimulationRng;

/// At or above this attack/defense ratio the attack always scores.
pub const GOAL_RATIO_THRESHOLD: f32 = 1.12;
/// At or below this ratio the defense always prevails.
pub const SAVE_RATIO_THRESHOLD: f32 = 0.90;

const GOAL_PROBABILITY_BASE: f32 = 0.08;
const GOAL_PROBABILITY_SLOPE: f32 = 0.45;
const SAVE_PROBABILITY_BASE: f32 = 0.18;
const SAVE_PROBABILITY_SLOPE: f32 = 0.35;

const PERFORMANCE_BASELINE: f32 = 6.0;
const ATTACKER_RATIO_WEIGHT: f32 = 0.6;
const DEFENDER_RATIO_WEIGHT: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuelOutcome {
    Goal,
    Save,
    Turnover,
}

impl DuelOutcome {
    fn attacker_bonus(&self) -> f32 {
        match self {
            DuelOutcome::Goal => 0.8,
            DuelOutcome::Save => -0.2,
            DuelOutcome::Turnover => -0.4,
        }
    }

    fn defender_bonus(&self) -> f32 {
        -self.attacker_bonus()
    }
}

/// One side of a duel. Every factor is a multiplier on `strength`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorDescriptor {
    pub strength: f32,
    pub chemistry: f32,
    pub form: f32,
    pub stamina: f32,
    pub tactical_bonus: f32,
    pub chaos_ceiling: f32,
}

impl SectorDescriptor {
    /// Plain strength with neutral factors and no chaos.
    pub fn new(strength: f32) -> Self {
        SectorDescriptor {
            strength,
            chemistry: 1.0,
            form: 1.0,
            stamina: 1.0,
            tactical_bonus: 1.0,
            chaos_ceiling: 0.0,
        }
    }

    pub fn base_power(&self) -> f32 {
        self.strength * self.chemistry * self.form * self.stamina * self.tactical_bonus
    }

    /// `base_power × (1 + U[0, chaos) / 100)`.
    pub fn power(&self, rng: &mut SimulationRng) -> f32 {
        let noise = rng.range_f32(0.0, self.chaos_ceiling.max(0.0));

        self.base_power() * (1.0 + noise / 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuelResult {
    pub outcome: DuelOutcome,
    pub ratio: f32,
    pub attacker_score: f32,
    pub defender_score: f32,
}

pub struct DuelResolver;

impl DuelResolver {
    pub fn resolve(
        attack: &SectorDescriptor,
        defense: &SectorDescriptor,
        rng: &mut SimulationRng,
    ) -> DuelResult {
        let attack_power = attack.power(rng);
        let defense_power = defense.power(rng);

        let ratio = attack_power / defense_power.max(1.0);
        let outcome = Self::outcome_for_ratio(ratio, rng);

        DuelResult {
            outcome,
            ratio,
            attacker_score: Self::attacker_score(outcome, ratio),
            defender_score: Self::defender_score(outcome, ratio),
        }
    }

    /// Deterministic outside `(0.90, 1.12)`; a single roll inside it.
    pub fn outcome_for_ratio(ratio: f32, rng: &mut SimulationRng) -> DuelOutcome {
        if ratio >= GOAL_RATIO_THRESHOLD {
            return DuelOutcome::Goal;
        }

        if ratio <= SAVE_RATIO_THRESHOLD {
            return DuelOutcome::Save;
        }

        let goal_probability = Self::goal_probability(ratio);
        let save_probability = Self::save_probability(ratio);

        let roll = rng.next_f32();

        if roll < goal_probability {
            DuelOutcome::Goal
        } else if roll < goal_probability + save_probability {
            DuelOutcome::Save
        } else {
            DuelOutcome::Turnover
        }
    }

    pub fn goal_probability(ratio: f32) -> f32 {
        (GOAL_PROBABILITY_BASE + (ratio - 1.0) * GOAL_PROBABILITY_SLOPE).clamp(0.02, 0.70)
    }

    pub fn save_probability(ratio: f32) -> f32 {
        (SAVE_PROBABILITY_BASE + (1.0 / ratio - 1.0) * SAVE_PROBABILITY_SLOPE).clamp(0.05, 0.70)
    }

    pub fn attacker_score(outcome: DuelOutcome, ratio: f32) -> f32 {
        (PERFORMANCE_BASELINE + outcome.attacker_bonus() + (ratio - 1.0) * ATTACKER_RATIO_WEIGHT)
            .clamp(0.0, 10.0)
    }

    pub fn defender_score(outcome: DuelOutcome, ratio: f32) -> f32 {
        (PERFORMANCE_BASELINE + outcome.defender_bonus() + (1.0 - ratio) * DEFENDER_RATIO_WEIGHT)
            .clamp(0.0, 10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_threshold_is_inclusive() {
        let mut rng = SimulationRng::from_seed(1);

        let result = DuelResolver::resolve(
            &SectorDescriptor::new(112.0),
            &SectorDescriptor::new(100.0),
            &mut rng,
        );

        assert_eq!(result.ratio, GOAL_RATIO_THRESHOLD);
        assert_eq!(result.outcome, DuelOutcome::Goal);
    }

    #[test]
    fn test_save_threshold_is_inclusive() {
        let mut rng = SimulationRng::from_seed(1);

        for _ in 0..100 {
            let result = DuelResolver::resolve(
                &SectorDescriptor::new(90.0),
                &SectorDescriptor::new(100.0),
                &mut rng,
            );

            assert_eq!(result.outcome, DuelOutcome::Save);
        }
    }

    #[test]
    fn test_contested_band_split() {
        let mut rng = SimulationRng::from_seed(7);
        let attack = SectorDescriptor::new(100.0);
        let defense = SectorDescriptor::new(100.0);

        let (mut goals, mut saves, mut turnovers) = (0, 0, 0);

        for _ in 0..10_000 {
            match DuelResolver::resolve(&attack, &defense, &mut rng).outcome {
                DuelOutcome::Goal => goals += 1,
                DuelOutcome::Save => saves += 1,
                DuelOutcome::Turnover => turnovers += 1,
            }
        }

        // Formula-implied split at ratio 1.0 is 8% / 18% / 74%.
        assert!((600..=1000).contains(&goals), "goals: {}", goals);
        assert!((1500..=2100).contains(&saves), "saves: {}", saves);
        assert!((7000..=7800).contains(&turnovers), "turnovers: {}", turnovers);
    }

    #[test]
    fn test_defense_power_floor() {
        let mut rng = SimulationRng::from_seed(3);

        let result = DuelResolver::resolve(
            &SectorDescriptor::new(2.0),
            &SectorDescriptor::new(0.0),
            &mut rng,
        );

        assert_eq!(result.ratio, 2.0);
        assert_eq!(result.outcome, DuelOutcome::Goal);
    }

    #[test]
    fn test_probabilities_are_clamped() {
        assert_eq!(DuelResolver::goal_probability(1.0), 0.08);
        assert_eq!(DuelResolver::goal_probability(5.0), 0.70);
        assert_eq!(DuelResolver::save_probability(10.0), 0.05);
    }

    #[test]
    fn test_performance_scores() {
        let goal_attacker = DuelResolver::attacker_score(DuelOutcome::Goal, 1.5);
        let goal_defender = DuelResolver::defender_score(DuelOutcome::Goal, 1.5);

        assert!((goal_attacker - 7.1).abs() < 1e-5);
        assert!((goal_defender - 4.95).abs() < 1e-5);

        let turnover_defender = DuelResolver::defender_score(DuelOutcome::Turnover, 1.0);
        assert!((turnover_defender - 6.4).abs() < 1e-5);

        assert_eq!(DuelResolver::attacker_score(DuelOutcome::Goal, 20.0), 10.0);
        assert_eq!(DuelResolver::defender_score(DuelOutcome::Goal, 20.0), 0.0);
    }

    #[test]
    fn test_chaos_only_increases_power() {
        let mut rng = SimulationRng::from_seed(11);
        let mut descriptor = SectorDescriptor::new(100.0);
        descriptor.chaos_ceiling = 15.0;

        for _ in 0..1000 {
            let power = descriptor.power(&mut rng);
            assert!((100.0..=115.0).contains(&power));
        }
    }
}
