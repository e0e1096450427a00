//! Compressed Sparse Row (CSR) matrix format
//!
//! CSR format stores:
//! - `values`: Non-zero entries in row-major order
//! - `col_indices`: Column index for each value
//! - `row_ptrs`: Index into values/col_indices where each row starts

use crate::traits::{ComplexField, LinearOperator};
use ndarray::{Array1, Array2};
use std::ops::Range;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Compressed Sparse Row (CSR) matrix
///
/// O(nnz) storage; matrix-vector products are O(nnz) instead of O(n²).
#[derive(Debug, Clone)]
pub struct CsrMatrix<T: ComplexField> {
    /// Number of rows
    pub num_rows: usize,
    /// Number of columns
    pub num_cols: usize,
    /// Non-zero values in row-major order
    pub values: Vec<T>,
    /// Column indices for each value
    pub col_indices: Vec<usize>,
    /// Row pointers: row_ptrs[i] is the start of row i, row_ptrs[num_rows] = nnz
    pub row_ptrs: Vec<usize>,
}

impl<T: ComplexField> CsrMatrix<T> {
    /// Create a new empty CSR matrix
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        Self {
            num_rows,
            num_cols,
            values: Vec::new(),
            col_indices: Vec::new(),
            row_ptrs: vec![0; num_rows + 1],
        }
    }

    /// Create a CSR matrix from COO (coordinate) triplets
    ///
    /// Triplets are (row, col, value). Duplicate entries are summed, which
    /// is what finite-element assembly relies on.
    pub fn from_triplets(
        num_rows: usize,
        num_cols: usize,
        mut triplets: Vec<(usize, usize, T)>,
    ) -> Self {
        if triplets.is_empty() {
            return Self::new(num_rows, num_cols);
        }

        triplets.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut values = Vec::with_capacity(triplets.len());
        let mut col_indices = Vec::with_capacity(triplets.len());
        let mut row_ptrs = vec![0usize; num_rows + 1];

        let mut prev_row = usize::MAX;
        let mut prev_col = usize::MAX;

        for (row, col, val) in triplets {
            if row == prev_row && col == prev_col {
                if let Some(last) = values.last_mut() {
                    *last += val;
                }
            } else {
                values.push(val);
                col_indices.push(col);

                if row != prev_row {
                    let start = if prev_row == usize::MAX {
                        0
                    } else {
                        prev_row + 1
                    };
                    for item in row_ptrs.iter_mut().take(row + 1).skip(start) {
                        *item = values.len() - 1;
                    }
                }

                prev_row = row;
                prev_col = col;
            }
        }

        let last_row = if prev_row == usize::MAX { 0 } else { prev_row + 1 };
        for item in row_ptrs.iter_mut().take(num_rows + 1).skip(last_row) {
            *item = values.len();
        }

        Self {
            num_rows,
            num_cols,
            values,
            col_indices,
            row_ptrs,
        }
    }

    /// Number of non-zero entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Sparsity ratio (fraction of non-zero entries)
    pub fn sparsity(&self) -> f64 {
        let total = self.num_rows * self.num_cols;
        if total == 0 {
            0.0
        } else {
            self.nnz() as f64 / total as f64
        }
    }

    /// Range of indices in values/col_indices for a given row
    pub fn row_range(&self, row: usize) -> Range<usize> {
        self.row_ptrs[row]..self.row_ptrs[row + 1]
    }

    /// (col, value) pairs for a row
    pub fn row_entries(&self, row: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        let range = self.row_range(row);
        self.col_indices[range.clone()]
            .iter()
            .copied()
            .zip(self.values[range].iter().copied())
    }

    /// Matrix-vector product: y = A * x
    ///
    /// Parallelized with rayon for large matrices when the `parallel`
    /// feature is enabled.
    pub fn matvec(&self, x: &Array1<T>) -> Array1<T> {
        assert_eq!(x.len(), self.num_cols, "Input vector size mismatch");

        #[cfg(feature = "parallel")]
        {
            if self.num_rows >= 256 {
                return self.matvec_parallel(x);
            }
        }

        self.matvec_sequential(x)
    }

    fn matvec_sequential(&self, x: &Array1<T>) -> Array1<T> {
        let mut y = Array1::from_elem(self.num_rows, T::zero());

        for i in 0..self.num_rows {
            let mut sum = T::zero();
            for idx in self.row_range(i) {
                let j = self.col_indices[idx];
                sum += self.values[idx] * x[j];
            }
            y[i] = sum;
        }

        y
    }

    #[cfg(feature = "parallel")]
    fn matvec_parallel(&self, x: &Array1<T>) -> Array1<T> {
        let x_slice = x.as_slice().expect("Array should be contiguous");

        let results: Vec<T> = (0..self.num_rows)
            .into_par_iter()
            .map(|i| {
                let mut sum = T::zero();
                for idx in self.row_range(i) {
                    let j = self.col_indices[idx];
                    sum += self.values[idx] * x_slice[j];
                }
                sum
            })
            .collect();

        Array1::from_vec(results)
    }

    /// Convert to a dense matrix
    ///
    /// Used by the direct solver; only suitable for modest system sizes.
    pub fn to_dense(&self) -> Array2<T> {
        let mut dense = Array2::from_elem((self.num_rows, self.num_cols), T::zero());

        for i in 0..self.num_rows {
            for idx in self.row_range(i) {
                let j = self.col_indices[idx];
                dense[[i, j]] = self.values[idx];
            }
        }

        dense
    }
}

impl<T: ComplexField> LinearOperator<T> for CsrMatrix<T> {
    fn num_rows(&self) -> usize {
        self.num_rows
    }

    fn num_cols(&self) -> usize {
        self.num_cols
    }

    fn apply(&self, x: &Array1<T>) -> Array1<T> {
        self.matvec(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use num_complex::Complex64;

    #[test]
    fn test_from_triplets_sums_duplicates() {
        let triplets = vec![
            (0, 0, 1.0_f64),
            (0, 1, 2.0),
            (1, 1, 3.0),
            (0, 0, 4.0), // duplicate of (0, 0)
        ];
        let csr = CsrMatrix::from_triplets(2, 2, triplets);

        assert_eq!(csr.nnz(), 3);
        let dense = csr.to_dense();
        assert_eq!(dense[[0, 0]], 5.0);
        assert_eq!(dense[[0, 1]], 2.0);
        assert_eq!(dense[[1, 0]], 0.0);
        assert_eq!(dense[[1, 1]], 3.0);
    }

    #[test]
    fn test_from_triplets_empty_rows() {
        let triplets = vec![(2, 0, 1.0_f64)];
        let csr = CsrMatrix::from_triplets(4, 2, triplets);

        assert_eq!(csr.nnz(), 1);
        assert_eq!(csr.row_range(0), 0..0);
        assert_eq!(csr.row_range(1), 0..0);
        assert_eq!(csr.row_range(2), 0..1);
        assert_eq!(csr.row_range(3), 1..1);
    }

    #[test]
    fn test_matvec_complex() {
        let triplets = vec![
            (0, 0, Complex64::new(1.0, 1.0)),
            (0, 1, Complex64::new(0.0, -1.0)),
            (1, 1, Complex64::new(2.0, 0.0)),
        ];
        let csr = CsrMatrix::from_triplets(2, 2, triplets);

        let x = array![Complex64::new(1.0, 0.0), Complex64::new(0.0, 1.0)];
        let y = csr.matvec(&x);

        // row 0: (1+i)*1 + (-i)*(i) = 1 + i + 1 = 2 + i
        assert!((y[0] - Complex64::new(2.0, 1.0)).norm() < 1e-14);
        // row 1: 2*i
        assert!((y[1] - Complex64::new(0.0, 2.0)).norm() < 1e-14);
    }

    #[test]
    fn test_row_entries() {
        let triplets = vec![(0, 1, 2.0_f64), (0, 0, 1.0), (1, 0, 3.0)];
        let csr = CsrMatrix::from_triplets(2, 2, triplets);

        let row0: Vec<(usize, f64)> = csr.row_entries(0).collect();
        assert_eq!(row0, vec![(0, 1.0), (1, 2.0)]);
    }
}
