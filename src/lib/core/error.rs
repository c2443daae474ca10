//! Error types for the xenprep library

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum XenprepError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Sparse matrix error: {0}")]
    SparseMatrix(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Column '{column}' not found in {source_name}")]
    MissingColumn { column: String, source_name: String },

    #[error("Parse error at line {line}: cannot read {field} from '{value}'")]
    Parse {
        field: String,
        value: String,
        line: u64,
    },

    #[error("Threshold validation error: {field} must be a number, got {value}")]
    ThresholdValidation { field: String, value: f64 },

    /// A run precondition does not hold; nothing was read or written.
    #[error("{0}")]
    Precondition(String),

    #[error("Output already exists: {}", .0.display())]
    OutputExists(PathBuf),
}

pub type Result<T> = std::result::Result<T, XenprepError>;

impl From<nalgebra_sparse::SparseFormatError> for XenprepError {
    fn from(err: nalgebra_sparse::SparseFormatError) -> Self {
        XenprepError::SparseMatrix(format!("Sparse format error: {:?}", err))
    }
}
