//! Sparse count matrix utilities built on `nalgebra_sparse`

use crate::core::error::{Result, XenprepError};
use itertools::Itertools;
use nalgebra_sparse::{CooMatrix, CsrMatrix};

pub struct SparseOps;

impl SparseOps {
    /// Create CSR matrix from (row, col, value) triplets using nalgebra_sparse native conversion.
    ///
    /// Duplicate coordinates are summed by the COO to CSR conversion.
    pub fn from_triplets_u32(
        nrows: usize,
        ncols: usize,
        triplets: Vec<(usize, usize, u32)>,
    ) -> Result<CsrMatrix<u32>> {
        if nrows == 0 || ncols == 0 || triplets.is_empty() {
            return Ok(CsrMatrix::zeros(nrows, ncols));
        }

        for &(row, col, _) in &triplets {
            if row >= nrows || col >= ncols {
                return Err(XenprepError::InvalidInput(format!(
                    "Index ({}, {}) exceeds matrix dimensions ({}, {})",
                    row, col, nrows, ncols
                )));
            }
        }

        let (row_indices, col_indices, values): (Vec<_>, Vec<_>, Vec<_>) =
            triplets.into_iter().multiunzip();

        let coo = CooMatrix::try_from_triplets(nrows, ncols, row_indices, col_indices, values)?;

        Ok(CsrMatrix::from(&coo))
    }

    /// Row sums, saturating at `u32::MAX`.
    pub fn compute_row_sums(matrix: &CsrMatrix<u32>) -> Vec<u32> {
        (0..matrix.nrows())
            .map(|row_idx| {
                matrix
                    .row(row_idx)
                    .values()
                    .iter()
                    .fold(0u64, |acc, &val| acc.saturating_add(val as u64))
                    .min(u32::MAX as u64) as u32
            })
            .collect()
    }

    /// Column sums, saturating at `u32::MAX`.
    pub fn compute_col_sums(matrix: &CsrMatrix<u32>) -> Vec<u32> {
        let mut sums = vec![0u64; matrix.ncols()];
        for (_, col, &val) in matrix.triplet_iter() {
            sums[col] = sums[col].saturating_add(val as u64);
        }
        sums.into_iter()
            .map(|sum| sum.min(u32::MAX as u64) as u32)
            .collect()
    }

    /// Get matrix density statistics: (density, nnz, total elements).
    pub fn get_density_stats(matrix: &CsrMatrix<u32>) -> (f64, usize, usize) {
        let total_elements = matrix.nrows() * matrix.ncols();
        let nnz = matrix.nnz();
        let density = if total_elements > 0 {
            nnz as f64 / total_elements as f64
        } else {
            0.0
        };
        (density, nnz, total_elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_csr_and_sums_duplicates() -> Result<()> {
        let csr = SparseOps::from_triplets_u32(
            2,
            3,
            vec![(0, 0, 1), (1, 2, 4), (0, 0, 2), (1, 0, 1)],
        )?;
        let entries: Vec<_> = csr.triplet_iter().map(|(r, c, v)| (r, c, *v)).collect();
        assert_eq!(entries, vec![(0, 0, 3), (1, 0, 1), (1, 2, 4)]);
        assert_eq!(SparseOps::compute_row_sums(&csr), vec![3, 5]);
        assert_eq!(SparseOps::compute_col_sums(&csr), vec![4, 0, 4]);
        Ok(())
    }

    #[test]
    fn rejects_out_of_range_indices() {
        let err = SparseOps::from_triplets_u32(2, 2, vec![(2, 0, 1)]).unwrap_err();
        assert!(matches!(err, XenprepError::InvalidInput(_)));
    }

    #[test]
    fn empty_shapes_produce_zero_matrices() -> Result<()> {
        let csr = SparseOps::from_triplets_u32(3, 0, Vec::new())?;
        assert_eq!((csr.nrows(), csr.ncols(), csr.nnz()), (3, 0, 0));
        let (density, nnz, total) = SparseOps::get_density_stats(&csr);
        assert_eq!((density, nnz, total), (0.0, 0, 0));
        Ok(())
    }
}
