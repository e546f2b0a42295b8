//! The six triple-loop multiplication kernels.
//!
//! Every kernel computes the same C = A × B over square row-major
//! matrices; only the nesting order of the i (row of C), j (column of C)
//! and k (reduction) loops differs. Each one zeroes C before accumulating.
//!
//! Available kernels:
//! - `naive_ijk`, `naive_jik`: dot-product form, B walked by column
//! - `naive_kij`, `naive_ikj`: row-update form, B and C walked by row
//! - `naive_jki`, `naive_kji`: column-update form, A and C walked by column

pub mod naive_ijk;
pub mod naive_ikj;
pub mod naive_jik;
pub mod naive_jki;
pub mod naive_kij;
pub mod naive_kji;

use std::fmt;
use std::str::FromStr;

use crate::error::{BenchError, Result};
use crate::matrix::Matrix;

pub use naive_ijk::matmul_ijk;
pub use naive_ikj::matmul_ikj;
pub use naive_jik::matmul_jik;
pub use naive_jki::matmul_jki;
pub use naive_kij::matmul_kij;
pub use naive_kji::matmul_kji;

fn check_lengths(a: &[f64], b: &[f64], c: &[f64], n: usize) {
    assert_eq!(a.len(), n * n, "A: expected {}x{}={} elements", n, n, n * n);
    assert_eq!(b.len(), n * n, "B: expected {}x{}={} elements", n, n, n * n);
    assert_eq!(c.len(), n * n, "C: expected {}x{}={} elements", n, n, n * n);
}

/// Loop nesting order of a multiplication kernel, outermost index first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopOrder {
    Ijk,
    Jik,
    Kij,
    Ikj,
    Jki,
    Kji,
}

impl LoopOrder {
    /// All orderings in the sequence the benchmark measures them.
    pub const ALL: [LoopOrder; 6] = [
        LoopOrder::Ijk,
        LoopOrder::Jik,
        LoopOrder::Kij,
        LoopOrder::Ikj,
        LoopOrder::Jki,
        LoopOrder::Kji,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LoopOrder::Ijk => "ijk",
            LoopOrder::Jik => "jik",
            LoopOrder::Kij => "kij",
            LoopOrder::Ikj => "ikj",
            LoopOrder::Jki => "jki",
            LoopOrder::Kji => "kji",
        }
    }

    /// The raw slice kernel for this ordering.
    pub fn kernel(&self) -> fn(&[f64], &[f64], &mut [f64], usize) {
        match self {
            LoopOrder::Ijk => matmul_ijk,
            LoopOrder::Jik => matmul_jik,
            LoopOrder::Kij => matmul_kij,
            LoopOrder::Ikj => matmul_ikj,
            LoopOrder::Jki => matmul_jki,
            LoopOrder::Kji => matmul_kji,
        }
    }

    /// C = A × B using this loop order. C is overwritten.
    ///
    /// # Errors
    /// Returns [`BenchError::DimensionMismatch`] if the three matrices do
    /// not share one size.
    pub fn multiply(&self, a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<()> {
        let n = a.size();
        for got in [b.size(), c.size()] {
            if got != n {
                return Err(BenchError::DimensionMismatch { expected: n, got });
            }
        }
        (self.kernel())(a.as_slice(), b.as_slice(), c.as_mut_slice(), n);
        Ok(())
    }
}

impl fmt::Display for LoopOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LoopOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        LoopOrder::ALL
            .into_iter()
            .find(|o| o.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown loop ordering: {}", s))
    }
}
