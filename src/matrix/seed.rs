use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand::rngs::StdRng;

/// How the operand generator is seeded before each size's population pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedPolicy {
    /// Derive the seed from the wall clock. Every run differs.
    #[default]
    Clock,
    /// Derive the seed from a fixed base. Runs are reproducible.
    Fixed(u64),
}

impl SeedPolicy {
    /// Seed used for the matrices of the given size.
    ///
    /// The size is mixed in so that successive sizes draw different
    /// sequences even when the clock has not advanced.
    pub fn seed_for(&self, size: usize) -> u64 {
        let base = match self {
            SeedPolicy::Clock => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0),
            SeedPolicy::Fixed(seed) => *seed,
        };
        base ^ (size as u64).rotate_left(32)
    }

    /// A freshly seeded generator for the given size.
    pub fn rng_for(&self, size: usize) -> StdRng {
        StdRng::seed_from_u64(self.seed_for(size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_fixed_is_reproducible() {
        let p = SeedPolicy::Fixed(1234);
        assert_eq!(p.seed_for(100), p.seed_for(100));
        let a: f64 = p.rng_for(100).r#gen();
        let b: f64 = p.rng_for(100).r#gen();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sizes_get_distinct_seeds() {
        let p = SeedPolicy::Fixed(1234);
        assert_ne!(p.seed_for(50), p.seed_for(100));

        let c = SeedPolicy::Clock;
        assert_ne!(c.seed_for(50), c.seed_for(100));
    }

    #[test]
    fn test_fixed_mixes_rotated_size() {
        assert_eq!(SeedPolicy::Fixed(0).seed_for(3), 3 << 32);
        assert_eq!(SeedPolicy::Fixed(u64::MAX).seed_for(1), !(1 << 32));
    }

    #[test]
    fn test_default_is_clock() {
        assert_eq!(SeedPolicy::default(), SeedPolicy::Clock);
    }
}
