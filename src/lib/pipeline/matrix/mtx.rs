//! Seurat/Scanpy compatible feature-cell matrix directory.
//!
//! The output directory holds exactly three files:
//!
//! - `matrix.mtx`: MatrixMarket coordinate matrix, genes as rows, cells as columns
//! - `barcodes.tsv`: one `cell_<id>` label per column, no header
//! - `features.tsv`: `gene\tgene\tcategory` per row, no header

use crate::core::error::Result;
use crate::core::fs::create_new_dir;
use crate::core::io::get_writer;
use crate::pipeline::matrix::aggregate::CountMatrix;
use crate::pipeline::matrix::feature::FeatureCategory;
use log::info;
use nalgebra_sparse::CsrMatrix;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const MATRIX_FILE: &str = "matrix.mtx";
pub const BARCODES_FILE: &str = "barcodes.tsv";
pub const FEATURES_FILE: &str = "features.tsv";
pub const BARCODE_PREFIX: &str = "cell_";

const MTX_HEADER: &str = "%%MatrixMarket matrix coordinate integer general";

/// Create `out_dir` and write the three matrix files into it.
///
/// Fails without writing anything if `out_dir` already exists.
pub fn write_feature_cell_matrix<P: AsRef<Path>>(counts: &CountMatrix, out_dir: P) -> Result<()> {
    let out_dir = out_dir.as_ref();
    create_new_dir(out_dir)?;

    write_matrix_market(counts.matrix(), out_dir.join(MATRIX_FILE))?;
    write_barcodes(counts.cells(), out_dir.join(BARCODES_FILE))?;
    write_features(counts.genes(), out_dir.join(FEATURES_FILE))?;

    info!(
        "Wrote {} × {} matrix ({} non-zero) to {:?}",
        counts.genes().len(),
        counts.cells().len(),
        counts.nnz(),
        out_dir
    );
    Ok(())
}

/// Write a count matrix in MatrixMarket coordinate format, 1-based, row-major.
pub fn write_matrix_market<P: AsRef<Path>>(matrix: &CsrMatrix<u32>, path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_matrix_market_to(matrix, &mut writer)?;
    writer.flush()?;
    Ok(())
}

pub fn write_matrix_market_to<W: Write>(matrix: &CsrMatrix<u32>, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", MTX_HEADER)?;
    writeln!(writer, "%")?;
    writeln!(
        writer,
        "{} {} {}",
        matrix.nrows(),
        matrix.ncols(),
        matrix.nnz()
    )?;
    for (row, col, value) in matrix.triplet_iter() {
        writeln!(writer, "{} {} {}", row + 1, col + 1, value)?;
    }
    Ok(())
}

pub fn write_barcodes<P: AsRef<Path>>(cells: &[String], path: P) -> Result<()> {
    let mut writer = get_writer(path, b'\t', false)?;
    for cell in cells {
        writer.write_record([format!("{}{}", BARCODE_PREFIX, cell)])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_features<P: AsRef<Path>>(genes: &[String], path: P) -> Result<()> {
    let mut writer = get_writer(path, b'\t', false)?;
    for gene in genes {
        let category = FeatureCategory::of(gene);
        writer.write_record([gene.as_str(), gene.as_str(), category.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}
