// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use crate::traits::StructureError;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::{AddAssign, Mul};

/// Tile edge used by the cache-blocked kernels.
pub const DEFAULT_BLOCK: usize = 8;

/// Element types the multiplication kernels accept.
pub trait Scalar: Copy + Default + AddAssign + Mul<Output = Self> + Send + Sync {}

impl<T> Scalar for T where T: Copy + Default + AddAssign + Mul<Output = T> + Send + Sync {}

/// Dense row-major matrix.
///
/// Three multiplication strategies are provided so they can be benchmarked
/// against each other:
///
/// - [`natural_mul`](Self::natural_mul): textbook i-j-k loop.
/// - [`blocked_mul`](Self::blocked_mul): the same loop tiled into
///   `DEFAULT_BLOCK`-sized squares so both operands stay in cache.
/// - [`parallel_mul`](Self::parallel_mul): the blocked kernel applied to
///   bands of result rows on the rayon thread pool.
///
/// All three reject operands whose inner dimensions differ.
///
/// # Example
///
/// ```
/// use structure_bench::Matrix;
///
/// let a = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
/// let id = Matrix::identity(2);
/// assert_eq!(a.natural_mul(&id).unwrap(), a);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Scalar> Matrix<T> {
    /// Creates a `rows x cols` matrix of default (zero) elements.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::default(); rows * cols],
        }
    }

    /// Wraps row-major `data`, which must hold exactly `rows * cols` elements.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, StructureError> {
        if data.len() != rows * cols {
            return Err(StructureError::DimensionMismatch(format!(
                "{} elements cannot fill a {}x{} matrix",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn get(&self, row: usize, col: usize) -> Result<&T, StructureError> {
        let idx = self.index(row, col)?;
        Ok(&self.data[idx])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut T, StructureError> {
        let idx = self.index(row, col)?;
        Ok(&mut self.data[idx])
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, StructureError> {
        if row >= self.rows || col >= self.cols {
            return Err(StructureError::OutOfBounds(format!(
                "({}, {}) outside {}x{} matrix",
                row, col, self.rows, self.cols
            )));
        }
        Ok(row * self.cols + col)
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    fn check_product(&self, other: &Self) -> Result<(), StructureError> {
        if self.cols != other.rows {
            return Err(StructureError::DimensionMismatch(format!(
                "cannot multiply {}x{} by {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }
        Ok(())
    }

    pub fn natural_mul(&self, other: &Self) -> Result<Self, StructureError> {
        self.check_product(other)?;
        let mut result = Self::new(self.rows, other.cols);
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut sum = T::default();
                for k in 0..self.cols {
                    sum += self.at(i, k) * other.at(k, j);
                }
                result.data[i * other.cols + j] = sum;
            }
        }
        Ok(result)
    }

    pub fn blocked_mul(&self, other: &Self) -> Result<Self, StructureError> {
        self.blocked_mul_with(other, DEFAULT_BLOCK)
    }

    pub fn blocked_mul_with(&self, other: &Self, block: usize) -> Result<Self, StructureError> {
        self.check_product(other)?;
        if block == 0 {
            return Err(StructureError::InvalidInput("block size must be non-zero".into()));
        }
        let mut result = Self::new(self.rows, other.cols);
        let width = other.cols;
        for i in (0..self.rows).step_by(block) {
            let band_end = (i + block).min(self.rows);
            let band = &mut result.data[i * width..band_end * width];
            self.multiply_band(other, i, band, block);
        }
        Ok(result)
    }

    /// Splits the result into row bands and fills them on the rayon pool.
    pub fn parallel_mul(&self, other: &Self) -> Result<Self, StructureError> {
        self.check_product(other)?;
        let mut result = Self::new(self.rows, other.cols);
        let width = other.cols;
        if width == 0 {
            return Ok(result);
        }
        let threads = rayon::current_num_threads().max(1);
        let band_rows = self.rows.div_ceil(threads).max(1);
        result
            .data
            .par_chunks_mut(band_rows * width)
            .enumerate()
            .for_each(|(band, rows)| {
                self.multiply_band(other, band * band_rows, rows, DEFAULT_BLOCK);
            });
        Ok(result)
    }

    /// Accumulates rows `first_row..` of `self * other` into `out`, tiling
    /// the column and inner dimensions by `block`.
    fn multiply_band(&self, other: &Self, first_row: usize, out: &mut [T], block: usize) {
        let width = other.cols;
        let band_rows = out.len() / width.max(1);
        for j in (0..width).step_by(block) {
            let j_end = (j + block).min(width);
            for k in (0..self.cols).step_by(block) {
                let k_end = (k + block).min(self.cols);
                for local in 0..band_rows {
                    let row = first_row + local;
                    for jx in j..j_end {
                        let mut sum = T::default();
                        for kx in k..k_end {
                            sum += self.at(row, kx) * other.at(kx, jx);
                        }
                        out[local * width + jx] += sum;
                    }
                }
            }
        }
    }
}

impl<T: Scalar + From<u8>> Matrix<T> {
    pub fn identity(n: usize) -> Self {
        let mut m = Self::new(n, n);
        for i in 0..n {
            m.data[i * n + i] = T::from(1u8);
        }
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequential(rows: usize, cols: usize) -> Matrix<i64> {
        Matrix::from_vec(rows, cols, (0..(rows * cols) as i64).collect()).unwrap()
    }

    #[test]
    fn test_small_product() {
        let a = Matrix::from_vec(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let b = Matrix::from_vec(3, 2, vec![7, 8, 9, 10, 11, 12]).unwrap();
        let expected = Matrix::from_vec(2, 2, vec![58, 64, 139, 154]).unwrap();
        assert_eq!(a.natural_mul(&b).unwrap(), expected);
        assert_eq!(a.blocked_mul(&b).unwrap(), expected);
        assert_eq!(a.parallel_mul(&b).unwrap(), expected);
    }

    #[test]
    fn test_strategies_agree_on_ragged_blocks() {
        let a = sequential(19, 13);
        let b = sequential(13, 21);
        let natural = a.natural_mul(&b).unwrap();
        assert_eq!(a.blocked_mul(&b).unwrap(), natural);
        assert_eq!(a.blocked_mul_with(&b, 5).unwrap(), natural);
        assert_eq!(a.parallel_mul(&b).unwrap(), natural);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = sequential(2, 3);
        let b = sequential(2, 3);
        for result in [a.natural_mul(&b), a.blocked_mul(&b), a.parallel_mul(&b)] {
            assert!(matches!(result, Err(StructureError::DimensionMismatch(_))));
        }
    }

    #[test]
    fn test_bounds_checked_access() {
        let mut m = sequential(2, 2);
        assert_eq!(*m.get(1, 0).unwrap(), 2);
        *m.get_mut(0, 1).unwrap() = 42;
        assert_eq!(*m.get(0, 1).unwrap(), 42);
        assert!(matches!(m.get(2, 0), Err(StructureError::OutOfBounds(_))));
        assert!(Matrix::<i64>::from_vec(2, 2, vec![1]).is_err());
    }

    #[test]
    fn test_zero_block_rejected() {
        let a = sequential(2, 2);
        assert!(a.blocked_mul_with(&a, 0).is_err());
    }

    #[test]
    fn test_empty_dimensions() {
        let a = Matrix::<i64>::new(3, 0);
        let b = Matrix::<i64>::new(0, 4);
        let product = a.parallel_mul(&b).unwrap();
        assert_eq!(product, Matrix::new(3, 4));
        assert_eq!(a.blocked_mul(&b).unwrap(), product);
    }
}
