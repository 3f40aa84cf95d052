use crate::r#match::{MatchEvent, MatchEventKind, MatchResult, MATCH_MINUTES};
use crate::utils::SimulationRng;
use itertools::Itertools;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketPairing {
    pub pairs: Vec<(u32, u32)>,
    pub bye: Option<u32>,
}

pub struct BracketBuilder;

impl BracketBuilder {
    /// Pairs entrants in order (`[0] vs [1]`, `[2] vs [3]`, …); an odd
    /// entrant out gets a bye.
    pub fn pair(club_ids: &[u32]) -> BracketPairing {
        let mut tuples = club_ids.iter().copied().tuples::<(u32, u32)>();
        let pairs: Vec<(u32, u32)> = tuples.by_ref().collect();
        let bye = tuples.into_buffer().next();

        BracketPairing { pairs, bye }
    }

    /// Number of stages until one club is left.
    pub fn stage_count(pool_size: usize) -> u32 {
        let mut remaining = pool_size;
        let mut stages = 0;

        while remaining > 1 {
            remaining = remaining.div_ceil(2);
            stages += 1;
        }

        stages
    }

    pub fn seed(mut pool: Vec<u32>, rng: &mut SimulationRng) -> Vec<u32> {
        rng.shuffle(&mut pool);
        pool
    }

    /// Penalty shootout stand-in: a drawn knockout tie goes to either side
    /// with equal probability by a single extra goal.
    pub fn resolve_penalties(result: &mut MatchResult, rng: &mut SimulationRng) {
        if !result.score.is_draw() {
            return;
        }

        let winner = if rng.chance(0.5) {
            result.score.home += 1;
            result.home_club_id
        } else {
            result.score.away += 1;
            result.away_club_id
        };

        result.decided_on_penalties = true;
        result
            .events
            .push(MatchEvent::new(MATCH_MINUTES, Some(winner), MatchEventKind::Penalties));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::Score;

    #[test]
    fn test_pair_even_and_odd() {
        let even = BracketBuilder::pair(&[1, 2, 3, 4]);
        assert_eq!(even.pairs, vec![(1, 2), (3, 4)]);
        assert_eq!(even.bye, None);

        let odd = BracketBuilder::pair(&[1, 2, 3]);
        assert_eq!(odd.pairs, vec![(1, 2)]);
        assert_eq!(odd.bye, Some(3));
    }

    #[test]
    fn test_stage_count() {
        assert_eq!(BracketBuilder::stage_count(1), 0);
        assert_eq!(BracketBuilder::stage_count(2), 1);
        assert_eq!(BracketBuilder::stage_count(6), 3);
        assert_eq!(BracketBuilder::stage_count(8), 3);
        assert_eq!(BracketBuilder::stage_count(16), 4);
    }

    #[test]
    fn test_penalties_break_draws_only() {
        let mut rng = SimulationRng::from_seed(1);

        let mut decided = MatchResult::empty(1, 2);
        decided.score = Score::new(2, 1);
        BracketBuilder::resolve_penalties(&mut decided, &mut rng);
        assert!(!decided.decided_on_penalties);
        assert_eq!(decided.score, Score::new(2, 1));

        let (mut home_wins, mut away_wins) = (0, 0);

        for _ in 0..1000 {
            let mut drawn = MatchResult::empty(1, 2);
            BracketBuilder::resolve_penalties(&mut drawn, &mut rng);

            assert!(drawn.decided_on_penalties);
            assert_eq!(drawn.score.home + drawn.score.away, 1);

            match drawn.winner() {
                Some(1) => home_wins += 1,
                Some(2) => away_wins += 1,
                _ => unreachable!(),
            }
        }

        assert!((400..=600).contains(&home_wins));
        assert!((400..=600).contains(&away_wins));
    }
}
