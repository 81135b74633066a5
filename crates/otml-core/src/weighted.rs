//! Weighted random choice.
//!
//! A [`WeightedPool`] repeats each item as many times as its weight, so a
//! uniform pick from the pool follows the weight distribution. Weights are
//! small configuration integers, which keeps the pool small.
//!
//! # Example
//!
//! ```
//! use otml_core::weighted::WeightedPool;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let pool = WeightedPool::new([("insert", 2), ("remove", 1), ("augment", 0)]);
//! assert_eq!(pool.len(), 3);
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let picked = *pool.choose(&mut rng).unwrap();
//! assert_ne!(picked, "augment");
//! ```

use rand::seq::IndexedRandom;
use rand::Rng;

/// A pool of items repeated in proportion to their weights.
#[derive(Debug, Clone)]
pub struct WeightedPool<T> {
    pool: Vec<T>,
}

impl<T: Clone> WeightedPool<T> {
    /// Builds the pool from `(item, weight)` pairs. Zero-weight items are
    /// left out.
    pub fn new(weighted: impl IntoIterator<Item = (T, u32)>) -> Self {
        let mut pool = Vec::new();
        for (item, weight) in weighted {
            pool.extend(std::iter::repeat(item).take(weight as usize));
        }
        Self { pool }
    }
}

impl<T> WeightedPool<T> {
    /// Picks an item; `None` when every weight was zero.
    pub fn choose<R: Rng>(&self, rng: &mut R) -> Option<&T> {
        self.pool.choose(rng)
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_empty_when_all_weights_zero() {
        let pool = WeightedPool::new([("a", 0), ("b", 0)]);
        assert!(pool.is_empty());
        let mut rng = StdRng::seed_from_u64(1);
        assert!(pool.choose(&mut rng).is_none());
    }

    #[test]
    fn test_zero_weight_never_chosen() {
        let pool = WeightedPool::new([("a", 1), ("never", 0), ("b", 3)]);
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..500 {
            assert_ne!(*pool.choose(&mut rng).unwrap(), "never");
        }
    }

    #[test]
    fn test_proportional_counts() {
        let pool = WeightedPool::new([("light", 1), ("heavy", 3)]);
        let mut rng = StdRng::seed_from_u64(2024);
        let heavy = (0..4000)
            .filter(|_| *pool.choose(&mut rng).unwrap() == "heavy")
            .count();
        // expected 3000
        assert!((2700..3300).contains(&heavy), "heavy picked {heavy} times");
    }
}
