//! Baysor transcript assignments and the confidence filter.

use crate::core::error::{Result, XenprepError};
use crate::core::io::{column_index, get_reader};
use crate::core::record_filter::RecordFilter;
use log::{info, warn};
use std::io::Read;
use std::path::Path;

pub const GENE_COLUMN: &str = "gene";
pub const CELL_COLUMN: &str = "cell";
pub const CONFIDENCE_COLUMN: &str = "assignment_confidence";

pub const DEFAULT_CONF_CUTOFF: f64 = 0.9;
pub const DEFAULT_REPORT_INTERVAL: usize = 100_000;

/// One transcript-to-cell assignment candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentRecord {
    pub gene: String,
    pub cell: String,
    pub assignment_confidence: f64,
}

impl AssignmentRecord {
    pub fn new(gene: impl Into<String>, cell: impl Into<String>, confidence: f64) -> Self {
        Self {
            gene: gene.into(),
            cell: cell.into(),
            assignment_confidence: confidence,
        }
    }
}

/// Read the `gene`, `cell` and `assignment_confidence` columns of a Baysor
/// segmentation table. Other columns are skipped while parsing and never stored.
/// Progress is logged every `report_interval` rows (0 disables it).
pub fn read_assignments<P: AsRef<Path>>(
    path: P,
    report_interval: usize,
) -> Result<Vec<AssignmentRecord>> {
    let path = path.as_ref();
    let mut reader = get_reader(path, b',', true)?;
    let records = read_assignments_from(&mut reader, path, report_interval)?;
    info!("Loaded {} transcript assignments from {:?}", records.len(), path);
    Ok(records)
}

pub fn read_assignments_from<R: Read>(
    reader: &mut csv::Reader<R>,
    source: &Path,
    report_interval: usize,
) -> Result<Vec<AssignmentRecord>> {
    let headers = reader.headers()?.clone();
    let gene_idx = column_index(&headers, GENE_COLUMN, source)?;
    let cell_idx = column_index(&headers, CELL_COLUMN, source)?;
    let conf_idx = column_index(&headers, CONFIDENCE_COLUMN, source)?;

    let mut records = Vec::new();
    let mut row = csv::StringRecord::new();
    while reader.read_record(&mut row)? {
        let line = row.position().map(|pos| pos.line()).unwrap_or_default();
        let raw_conf = field(&row, conf_idx, CONFIDENCE_COLUMN, line)?;
        let assignment_confidence =
            raw_conf
                .trim()
                .parse::<f64>()
                .map_err(|_| XenprepError::Parse {
                    field: CONFIDENCE_COLUMN.to_string(),
                    value: raw_conf.to_string(),
                    line,
                })?;

        records.push(AssignmentRecord {
            gene: field(&row, gene_idx, GENE_COLUMN, line)?.to_string(),
            cell: field(&row, cell_idx, CELL_COLUMN, line)?.trim().to_string(),
            assignment_confidence,
        });

        if report_interval > 0 && records.len() % report_interval == 0 {
            info!("Read {} transcripts", records.len());
        }
    }

    records.shrink_to_fit();
    Ok(records)
}

fn field<'a>(row: &'a csv::StringRecord, idx: usize, name: &str, line: u64) -> Result<&'a str> {
    row.get(idx).ok_or_else(|| XenprepError::Parse {
        field: name.to_string(),
        value: String::new(),
        line,
    })
}

/// Keeps assignments whose confidence is at least the cutoff (inclusive).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceFilter {
    conf_cutoff: f64,
}

impl ConfidenceFilter {
    pub fn new(conf_cutoff: f64) -> Result<Self> {
        if conf_cutoff.is_nan() {
            return Err(XenprepError::ThresholdValidation {
                field: "conf_cutoff".to_string(),
                value: conf_cutoff,
            });
        }
        if !(0.0..=1.0).contains(&conf_cutoff) {
            warn!(
                "Confidence cutoff {} lies outside [0, 1]; {} transcripts will pass",
                conf_cutoff,
                if conf_cutoff > 1.0 { "no" } else { "all" }
            );
        }
        Ok(Self { conf_cutoff })
    }

    pub fn conf_cutoff(&self) -> f64 {
        self.conf_cutoff
    }
}

impl RecordFilter<AssignmentRecord> for ConfidenceFilter {
    #[inline]
    fn filter_record(&self, record: &AssignmentRecord) -> bool {
        record.assignment_confidence >= self.conf_cutoff
    }
}
