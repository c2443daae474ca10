//! Grouped (gene, cell) counting into a sparse feature-by-cell matrix.

use crate::core::error::Result;
use crate::core::sparse::SparseOps;
use crate::pipeline::matrix::assignment::AssignmentRecord;
use log::{info, warn};
use nalgebra_sparse::CsrMatrix;
use rustc_hash::{FxHashMap, FxHashSet};

/// Baysor labels transcripts outside every cell with cell `0`.
pub const DEFAULT_UNASSIGNED_CELL: &str = "0";

/// Gene-by-cell transcript counts with their row and column labels.
#[derive(Debug, Clone)]
pub struct CountMatrix {
    matrix: CsrMatrix<u32>,
    genes: Vec<String>,
    cells: Vec<String>,
}

impl CountMatrix {
    /// Rows follow `genes()`, columns follow `cells()`.
    pub fn matrix(&self) -> &CsrMatrix<u32> {
        &self.matrix
    }

    pub fn genes(&self) -> &[String] {
        &self.genes
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.matrix.nrows(), self.matrix.ncols())
    }

    pub fn nnz(&self) -> usize {
        self.matrix.nnz()
    }

    /// Count for a labelled (gene, cell) pair; unknown labels count as zero.
    #[cfg(test)]
    pub fn get(&self, gene: &str, cell: &str) -> u32 {
        let row = self.genes.iter().position(|g| g == gene);
        let col = self.cells.iter().position(|c| c == cell);
        match (row, col) {
            (Some(row), Some(col)) => self
                .matrix
                .get_entry(row, col)
                .map(|entry| entry.into_value())
                .unwrap_or(0),
            _ => 0,
        }
    }
}

/// Builds a [`CountMatrix`] from confidence-filtered assignments.
#[derive(Debug, Clone)]
pub struct MatrixAggregator {
    unassigned: String,
}

impl Default for MatrixAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_UNASSIGNED_CELL)
    }
}

impl MatrixAggregator {
    pub fn new(unassigned: impl Into<String>) -> Self {
        Self {
            unassigned: unassigned.into(),
        }
    }

    pub fn unassigned(&self) -> &str {
        &self.unassigned
    }

    /// Empty cell labels are unassigned regardless of the configured sentinel.
    #[inline]
    pub fn is_unassigned(&self, cell: &str) -> bool {
        cell.is_empty() || cell == self.unassigned
    }

    /// Count assignments per (gene, cell) pair.
    ///
    /// Genes are every distinct gene in `records`, sorted; cells are every
    /// distinct assigned cell in natural order. Records on unassigned cells
    /// contribute their gene but no count.
    pub fn aggregate(&self, records: &[AssignmentRecord]) -> Result<CountMatrix> {
        let mut genes: Vec<&str> = Vec::new();
        let mut cells: Vec<&str> = Vec::new();
        let mut seen_genes: FxHashSet<&str> = FxHashSet::default();
        let mut seen_cells: FxHashSet<&str> = FxHashSet::default();
        let mut unassigned_records = 0usize;

        for record in records {
            if seen_genes.insert(record.gene.as_str()) {
                genes.push(record.gene.as_str());
            }
            if self.is_unassigned(&record.cell) {
                unassigned_records += 1;
            } else if seen_cells.insert(record.cell.as_str()) {
                cells.push(record.cell.as_str());
            }
        }

        if unassigned_records == 0 {
            warn!(
                "Unassigned cell label '{}' not found; every cell is kept",
                self.unassigned
            );
        }

        genes.sort_unstable();
        sort_cells_naturally(&mut cells);

        let gene_index: FxHashMap<&str, usize> =
            genes.iter().enumerate().map(|(i, g)| (*g, i)).collect();
        let cell_index: FxHashMap<&str, usize> =
            cells.iter().enumerate().map(|(i, c)| (*c, i)).collect();

        let mut counts: FxHashMap<(usize, usize), u32> = FxHashMap::default();
        for record in records {
            if self.is_unassigned(&record.cell) {
                continue;
            }
            let key = (
                gene_index[record.gene.as_str()],
                cell_index[record.cell.as_str()],
            );
            let count = counts.entry(key).or_insert(0);
            *count = count.saturating_add(1);
        }

        let mut triplets: Vec<(usize, usize, u32)> = counts
            .into_iter()
            .map(|((row, col), value)| (row, col, value))
            .collect();
        triplets.sort_unstable();

        let matrix = SparseOps::from_triplets_u32(genes.len(), cells.len(), triplets)?;
        let (density, nnz, _) = SparseOps::get_density_stats(&matrix);
        info!(
            "Built {} genes × {} cells matrix ({} non-zero, density {:.4}, {} unassigned transcripts skipped)",
            genes.len(),
            cells.len(),
            nnz,
            density,
            unassigned_records
        );

        Ok(CountMatrix {
            matrix,
            genes: genes.into_iter().map(str::to_string).collect(),
            cells: cells.into_iter().map(str::to_string).collect(),
        })
    }
}

/// Numeric order when every label is an integer, lexicographic otherwise.
fn sort_cells_naturally(cells: &mut [&str]) {
    if cells.iter().all(|c| c.parse::<i64>().is_ok()) {
        cells.sort_unstable_by_key(|c| (c.parse::<i64>().unwrap_or_default(), *c));
    } else {
        cells.sort_unstable();
    }
}
