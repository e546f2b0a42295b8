//! Square matrix storage for the benchmark operands.
//!
//! A matrix owns one contiguous row-major buffer of `size * size` doubles.
//! Operands A and B are filled once with uniform random values in [0, 10);
//! the result C is zeroed by every kernel before it accumulates.

pub mod seed;

use std::ops::{Index, IndexMut};

use rand::Rng;

use crate::error::{BenchError, Result};

pub use seed::SeedPolicy;

/// Upper bound (exclusive) of the random operand values.
pub const POPULATE_MAX: f64 = 10.0;

/// An N×N matrix of f64 stored row-major in a single buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    size: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Allocate a zero-filled `size`×`size` matrix.
    ///
    /// # Errors
    /// Returns [`BenchError::InvalidSize`] for `size == 0` and
    /// [`BenchError::Allocation`] if the buffer cannot be reserved.
    pub fn create(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(BenchError::InvalidSize { size });
        }
        let len = size
            .checked_mul(size)
            .ok_or(BenchError::Allocation { size })?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| BenchError::Allocation { size })?;
        data.resize(len, 0.0);

        Ok(Self { size, data })
    }

    /// Wrap an existing row-major buffer.
    ///
    /// # Errors
    /// Returns [`BenchError::InvalidSize`] for `size == 0` and
    /// [`BenchError::Length`] if `data.len() != size * size`.
    pub fn from_vec(size: usize, data: Vec<f64>) -> Result<Self> {
        if size == 0 {
            return Err(BenchError::InvalidSize { size });
        }
        let expected = size
            .checked_mul(size)
            .ok_or(BenchError::Allocation { size })?;
        if data.len() != expected {
            return Err(BenchError::Length {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { size, data })
    }

    /// Build a matrix from explicit rows. Every row must have as many
    /// entries as there are rows.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for row in rows {
            let row = row.as_ref();
            if row.len() != size {
                return Err(BenchError::Length {
                    expected: size,
                    got: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Self::from_vec(size, data)
    }

    /// Fill every element with an independent uniform draw from [0, 10).
    ///
    /// The generator is not reseeded here; callers populating A then B
    /// with the same `rng` get one continuing stream.
    pub fn populate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for x in self.data.iter_mut() {
            *x = rng.gen_range(0.0..POPULATE_MAX);
        }
    }

    /// Set every element to 0.0.
    pub fn initialize(&mut self) {
        self.data.fill(0.0);
    }

    /// Release the storage. Consuming `self` makes a double release
    /// impossible.
    pub fn release(self) {
        drop(self);
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Row `i` as a slice.
    ///
    /// # Panics
    /// Panics if `i >= size`.
    pub fn row(&self, i: usize) -> &[f64] {
        assert!(
            i < self.size,
            "row {} out of bounds for size {}",
            i,
            self.size
        );
        &self.data[i * self.size..(i + 1) * self.size]
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        assert!(
            i < self.size && j < self.size,
            "index ({}, {}) out of bounds for size {}",
            i,
            j,
            self.size
        );
        &self.data[i * self.size + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        assert!(
            i < self.size && j < self.size,
            "index ({}, {}) out of bounds for size {}",
            i,
            j,
            self.size
        );
        &mut self.data[i * self.size + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_create_zeroed() {
        let m = Matrix::create(4).unwrap();
        assert_eq!(m.size(), 4);
        assert_eq!(m.as_slice().len(), 16);
        assert!(m.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_create_zero_size() {
        assert!(matches!(
            Matrix::create(0),
            Err(BenchError::InvalidSize { size: 0 })
        ));
    }

    #[test]
    fn test_create_overflowing_size() {
        assert!(matches!(
            Matrix::create(usize::MAX),
            Err(BenchError::Allocation { .. })
        ));
    }

    #[test]
    fn test_populate_range() {
        let mut m = Matrix::create(32).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        m.populate(&mut rng);
        let in_range = |x: &f64| (0.0..POPULATE_MAX).contains(x);
        assert!(m.as_slice().iter().all(in_range));
        // Not all equal: the draws are independent.
        assert!(m.as_slice().iter().any(|&x| x != m[(0, 0)]));
    }

    #[test]
    fn test_populate_continues_stream() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut a = Matrix::create(8).unwrap();
        let mut b = Matrix::create(8).unwrap();
        a.populate(&mut rng);
        b.populate(&mut rng);
        assert_ne!(a, b);

        let mut rng = StdRng::seed_from_u64(42);
        let mut a2 = Matrix::create(8).unwrap();
        a2.populate(&mut rng);
        assert_eq!(a, a2);
    }

    #[test]
    fn test_initialize() {
        let mut m = Matrix::from_vec(2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        m.initialize();
        assert_eq!(m.as_slice(), &[0.0; 4]);
    }

    #[test]
    fn test_from_rows_and_index() {
        let mut m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        assert_eq!(m[(1, 0)], 3.0);
        assert_eq!(m.row(1), &[3.0, 4.0]);
        m[(0, 1)] = 9.0;
        assert_eq!(m.as_slice(), &[1.0, 9.0, 3.0, 4.0]);
    }

    #[test]
    fn test_from_rows_ragged() {
        let rows: Vec<Vec<f64>> = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(
            Matrix::from_rows(&rows),
            Err(BenchError::Length {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn test_from_vec_wrong_len() {
        let err = Matrix::from_vec(3, vec![0.0; 8]).unwrap_err();
        assert!(matches!(
            err,
            BenchError::Length {
                expected: 9,
                got: 8
            }
        ));
        assert_eq!(
            err.to_string(),
            "matrix buffer length mismatch: expected 9 elements, got 8"
        );

        // 15 elements is no square at all; the raw count is still reported.
        let err = Matrix::from_vec(4, vec![0.0; 15]).unwrap_err();
        assert!(matches!(
            err,
            BenchError::Length {
                expected: 16,
                got: 15
            }
        ));
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_bounds() {
        let m = Matrix::create(2).unwrap();
        let _ = m[(2, 0)];
    }
}
