//! Baysor transcript assignments to feature-cell matrix
//!
//! Reads the transcript-to-cell assignments Baysor writes in
//! `segmentation.csv`, keeps confident assignments, counts transcripts per
//! (gene, cell) pair and writes a 10x style MTX directory that Seurat and
//! Scanpy load directly.
//!
//! # Key Components
//!
//! - [`assignment`]: Assignment records, table loading and the confidence filter
//! - [`aggregate`]: Grouped counting into a sparse [`CountMatrix`]
//! - [`feature`]: Feature type annotation by gene prefix
//! - [`mtx`]: `matrix.mtx` / `barcodes.tsv` / `features.tsv` output

pub mod aggregate;
pub mod assignment;
pub mod feature;
pub mod mtx;

pub use aggregate::{CountMatrix, MatrixAggregator};
pub use assignment::{AssignmentRecord, ConfidenceFilter};
pub use feature::FeatureCategory;
pub use mtx::write_feature_cell_matrix;

use crate::core::error::Result;
use crate::core::record_filter::retain_passing;
use crate::core::sparse::SparseOps;
use log::info;

/// Drop low-confidence assignments and count the rest.
pub fn build_count_matrix(
    records: Vec<AssignmentRecord>,
    filter: &ConfidenceFilter,
    aggregator: &MatrixAggregator,
) -> Result<CountMatrix> {
    let total = records.len();
    let confident = retain_passing(records, filter);
    info!(
        "{} of {} transcripts pass assignment confidence >= {}",
        confident.len(),
        total,
        filter.conf_cutoff()
    );
    let counts = aggregator.aggregate(&confident)?;

    let summary = CountSummary::of(&counts);
    info!(
        "Transcripts per cell: min {}, max {}, mean {:.1}; {} genes without counts",
        summary.min_per_cell, summary.max_per_cell, summary.mean_per_cell, summary.empty_genes
    );
    Ok(counts)
}

/// Per-cell and per-gene totals of a [`CountMatrix`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CountSummary {
    pub min_per_cell: u32,
    pub max_per_cell: u32,
    pub mean_per_cell: f64,
    pub empty_genes: usize,
}

impl CountSummary {
    pub fn of(counts: &CountMatrix) -> Self {
        let per_cell = SparseOps::compute_col_sums(counts.matrix());
        let per_gene = SparseOps::compute_row_sums(counts.matrix());
        let total: u64 = per_cell.iter().map(|&n| n as u64).sum();
        Self {
            min_per_cell: per_cell.iter().copied().min().unwrap_or(0),
            max_per_cell: per_cell.iter().copied().max().unwrap_or(0),
            mean_per_cell: if per_cell.is_empty() {
                0.0
            } else {
                total as f64 / per_cell.len() as f64
            },
            empty_genes: per_gene.iter().filter(|&&n| n == 0).count(),
        }
    }
}
