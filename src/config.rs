//! Benchmark configuration.

use tracing::warn;

use crate::kernels::LoopOrder;
use crate::matrix::SeedPolicy;

/// Matrix sizes swept by a default run, ascending.
pub const DEFAULT_SIZES: [usize; 8] = [50, 100, 200, 400, 800, 1200, 1600, 2000];

/// Environment variable that pins the operand seed.
pub const SEED_ENV: &str = "MATMUL_ORDERS_SEED";

/// What to measure and how to seed the operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    pub sizes: Vec<usize>,
    pub orders: Vec<LoopOrder>,
    pub seed: SeedPolicy,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            orders: LoopOrder::ALL.to_vec(),
            seed: SeedPolicy::Clock,
        }
    }
}

impl BenchConfig {
    /// Default config, with a fixed seed if `MATMUL_ORDERS_SEED` is set to
    /// a valid `u64`.
    pub fn from_env() -> Self {
        Self::default().with_seed_var(std::env::var(SEED_ENV).ok().as_deref())
    }

    fn with_seed_var(self, value: Option<&str>) -> Self {
        match value.map(|v| v.trim().parse::<u64>()) {
            Some(Ok(seed)) => self.with_seed(SeedPolicy::Fixed(seed)),
            Some(Err(e)) => {
                warn!(var = SEED_ENV, error = %e, "ignoring invalid seed, seeding from the clock");
                self
            }
            None => self,
        }
    }

    pub fn with_sizes(mut self, sizes: impl Into<Vec<usize>>) -> Self {
        self.sizes = sizes.into();
        self
    }

    pub fn with_orders(mut self, orders: impl Into<Vec<LoopOrder>>) -> Self {
        self.orders = orders.into();
        self
    }

    pub fn with_seed(mut self, seed: SeedPolicy) -> Self {
        self.seed = seed;
        self
    }
}
