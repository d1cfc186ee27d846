//! Permutation sources for the draw engine.

use rand::rngs::{StdRng, ThreadRng};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Reorders a slice in place.
///
/// Implementations must produce a permutation: no element may be dropped or
/// duplicated.
pub trait Shuffler {
    fn shuffle<T>(&mut self, items: &mut [T]);
}

impl<S: Shuffler> Shuffler for &mut S {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        (**self).shuffle(items);
    }
}

/// Uniform Fisher-Yates shuffle driven by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomShuffler<R = ThreadRng> {
    rng: R,
}

impl RandomShuffler<ThreadRng> {
    /// Uses the thread-local generator.
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for RandomShuffler<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomShuffler<StdRng> {
    /// Reproducible shuffler for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomShuffler<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Shuffler for RandomShuffler<R> {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

/// Keeps the input order. Makes draws deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityShuffler;

impl Shuffler for IdentityShuffler {
    fn shuffle<T>(&mut self, _items: &mut [T]) {}
}

#[cfg(test)]
mod tests {
    use super::{IdentityShuffler, RandomShuffler, Shuffler};

    #[test]
    fn identity_keeps_order() {
        let mut values = vec![1, 2, 3, 4];
        IdentityShuffler.shuffle(&mut values);
        assert_eq!(values, vec![1, 2, 3, 4]);
    }

    #[test]
    fn random_shuffle_is_a_permutation() {
        let mut shuffler = RandomShuffler::seeded(7);
        let mut values: Vec<u32> = (0..50).collect();
        shuffler.shuffle(&mut values);

        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_gives_same_permutation() {
        let mut first: Vec<u32> = (0..20).collect();
        let mut second = first.clone();
        RandomShuffler::seeded(42).shuffle(&mut first);
        RandomShuffler::seeded(42).shuffle(&mut second);
        assert_eq!(first, second);
    }
}
