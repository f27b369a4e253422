//! Seeded randomness for phase ordering and the genetic optimizer.
//! The engine's determinism contract requires that identical inputs and
//! seed reproduce byte-identical output, so every source of "random"
//! order here is derived from a single `StdRng` seeded once per run.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub struct EngineRng(StdRng);

impl EngineRng {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Return a shuffled copy of `items`.
    pub fn shuffled<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut v = items.to_vec();
        v.shuffle(&mut self.0);
        v
    }

    pub fn gen_range(&mut self, range: std::ops::Range<usize>) -> usize {
        use rand::Rng;
        self.0.gen_range(range)
    }

    pub fn gen_bool(&mut self, p: f64) -> bool {
        use rand::Rng;
        self.0.gen_bool(p)
    }
}
