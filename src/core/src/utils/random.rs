use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The single source of randomness threaded through the engine.
///
/// Every random-dependent routine (possession rolls, chaos, weighted
/// selection, AI upkeep) draws from here, so a fixed seed replays a whole
/// season exactly.
#[derive(Debug, Clone)]
pub struct SimulationRng {
    inner: ChaCha8Rng,
}

impl SimulationRng {
    pub fn from_seed(seed: u64) -> Self {
        SimulationRng {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        SimulationRng {
            inner: ChaCha8Rng::from_entropy(),
        }
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        self.inner.gen_range(0.0..1.0)
    }

    pub fn chance(&mut self, probability: f32) -> bool {
        if probability <= 0.0 {
            return false;
        }

        self.next_f32() < probability
    }

    /// Uniform value in `[min, max)`; collapses to `min` for an empty range.
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }

        self.inner.gen_range(min..max)
    }

    /// Uniform integer in `[min, max]`.
    pub fn range_u32(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }

        self.inner.gen_range(min..=max)
    }

    pub fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }

        self.inner.gen_range(0..len)
    }

    /// `count` distinct indexes out of `0..len`, in draw order.
    pub fn distinct_indexes(&mut self, len: usize, count: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.inner, len, count.min(len)).into_vec()
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }
}

impl Default for SimulationRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
