use crate::utils::SimulationRng;

/// Draws up to `count` items without replacement, each pick proportional to
/// the remaining weights. Non-positive weights are never picked unless every
/// remaining weight is non-positive, in which case the pick is uniform.
pub fn weighted_sample<T: Copy>(
    rng: &mut SimulationRng,
    candidates: &[(T, f32)],
    count: usize,
) -> Vec<T> {
    let mut pool: Vec<(T, f32)> = candidates.to_vec();
    let mut picked = Vec::with_capacity(count.min(pool.len()));

    while picked.len() < count && !pool.is_empty() {
        let total: f32 = pool.iter().map(|(_, w)| w.max(0.0)).sum();

        let index = if total <= 0.0 {
            rng.index(pool.len())
        } else {
            let roll = rng.range_f32(0.0, total);
            let mut cumulative = 0.0;

            pool.iter()
                .position(|(_, w)| {
                    cumulative += w.max(0.0);
                    roll < cumulative
                })
                .unwrap_or(pool.len() - 1)
        };

        picked.push(pool.remove(index).0);
    }

    picked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_without_replacement() {
        let mut rng = SimulationRng::from_seed(11);
        let candidates = vec![(1u32, 10.0), (2, 10.0), (3, 10.0), (4, 10.0)];

        let mut picked = weighted_sample(&mut rng, &candidates, 3);
        assert_eq!(picked.len(), 3);

        picked.sort();
        picked.dedup();
        assert_eq!(picked.len(), 3);
    }

    #[test]
    fn test_sample_caps_at_pool_size() {
        let mut rng = SimulationRng::from_seed(11);
        let candidates = vec![(1u32, 1.0), (2, 1.0)];

        assert_eq!(weighted_sample(&mut rng, &candidates, 3).len(), 2);
        assert!(weighted_sample::<u32>(&mut rng, &[], 3).is_empty());
    }

    #[test]
    fn test_heavier_weight_is_picked_more_often() {
        let mut rng = SimulationRng::from_seed(5);
        let candidates = vec![(1u32, 1200.0), (2, 200.0)];

        let heavy_first = (0..2000)
            .filter(|_| weighted_sample(&mut rng, &candidates, 1)[0] == 1)
            .count();

        assert!(heavy_first > 1500, "heavy picked first {} times", heavy_first);
    }

    #[test]
    fn test_zero_weights_fall_back_to_uniform() {
        let mut rng = SimulationRng::from_seed(9);
        let candidates = vec![(1u32, 0.0), (2, 0.0)];

        assert_eq!(weighted_sample(&mut rng, &candidates, 2).len(), 2);
    }
}
