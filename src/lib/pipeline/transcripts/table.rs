//! In-memory Xenium transcript table.
//!
//! Rows keep every original column verbatim; only the columns the filter
//! needs are parsed into typed fields.

use crate::core::error::{Result, XenprepError};
use crate::core::io::{column_index, column_index_any, get_reader, get_writer};
use csv::StringRecord;
use log::info;
use std::io::{Read, Write};
use std::path::Path;

/// Accepted spellings of the quality score column (`qv` is what Xenium writes).
pub const QUALITY_COLUMNS: &[&str] = &["qv", "quality_value"];
pub const X_COLUMN: &str = "x_location";
pub const Y_COLUMN: &str = "y_location";
pub const FEATURE_COLUMN: &str = "feature_name";
pub const CELL_COLUMN: &str = "cell_id";

/// Positions of the columns the pipeline reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub quality_value: usize,
    pub x_location: usize,
    pub y_location: usize,
    pub feature_name: usize,
    pub cell_id: usize,
}

impl ColumnLayout {
    /// Resolve every required column from a header row, failing on the first one missing.
    pub fn resolve(headers: &StringRecord, source: &Path) -> Result<Self> {
        Ok(Self {
            quality_value: column_index_any(headers, QUALITY_COLUMNS, source)?,
            x_location: column_index(headers, X_COLUMN, source)?,
            y_location: column_index(headers, Y_COLUMN, source)?,
            feature_name: column_index(headers, FEATURE_COLUMN, source)?,
            cell_id: column_index(headers, CELL_COLUMN, source)?,
        })
    }
}

/// One detected transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptRecord {
    pub quality_value: f64,
    pub x_location: f64,
    pub y_location: f64,
    pub feature_name: String,
    pub cell_id: String,
    fields: StringRecord,
}

impl TranscriptRecord {
    /// Parse the typed fields of a raw row. `line` is only used for error reporting.
    pub fn from_row(fields: StringRecord, layout: &ColumnLayout, line: u64) -> Result<Self> {
        Ok(Self {
            quality_value: parse_f64(&fields, layout.quality_value, "quality value", line)?,
            x_location: parse_f64(&fields, layout.x_location, X_COLUMN, line)?,
            y_location: parse_f64(&fields, layout.y_location, Y_COLUMN, line)?,
            feature_name: field(&fields, layout.feature_name, FEATURE_COLUMN, line)?.to_string(),
            cell_id: field(&fields, layout.cell_id, CELL_COLUMN, line)?.to_string(),
            fields,
        })
    }

    /// The record as an output row: original fields, current `cell_id`.
    pub fn to_row(&self, layout: &ColumnLayout) -> StringRecord {
        self.fields
            .iter()
            .enumerate()
            .map(|(idx, value)| {
                if idx == layout.cell_id {
                    self.cell_id.as_str()
                } else {
                    value
                }
            })
            .collect()
    }
}

fn field<'a>(fields: &'a StringRecord, idx: usize, name: &str, line: u64) -> Result<&'a str> {
    fields.get(idx).ok_or_else(|| XenprepError::Parse {
        field: name.to_string(),
        value: String::new(),
        line,
    })
}

fn parse_f64(fields: &StringRecord, idx: usize, name: &str, line: u64) -> Result<f64> {
    let raw = field(fields, idx, name, line)?;
    raw.trim().parse::<f64>().map_err(|_| XenprepError::Parse {
        field: name.to_string(),
        value: raw.to_string(),
        line,
    })
}

/// A fully materialized transcript table.
#[derive(Debug, Clone)]
pub struct TranscriptTable {
    headers: StringRecord,
    layout: ColumnLayout,
    records: Vec<TranscriptRecord>,
}

impl TranscriptTable {
    /// Load a comma separated transcript table (`.csv` or `.csv.gz`).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = get_reader(path, b',', true)?;
        let table = Self::from_reader(&mut reader, path)?;
        info!("Loaded {} transcripts from {:?}", table.len(), path);
        Ok(table)
    }

    /// Load from an open CSV reader; `source` names the input in error messages.
    pub fn from_reader<R: Read>(reader: &mut csv::Reader<R>, source: &Path) -> Result<Self> {
        let headers = reader.headers()?.clone();
        let layout = ColumnLayout::resolve(&headers, source)?;

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result?;
            let line = row.position().map(|pos| pos.line()).unwrap_or_default();
            records.push(TranscriptRecord::from_row(row, &layout, line)?);
        }
        records.shrink_to_fit();

        Ok(Self {
            headers,
            layout,
            records,
        })
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    pub fn records(&self) -> &[TranscriptRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replace the record set, keeping header and layout.
    pub fn map_records<F>(self, f: F) -> Self
    where
        F: FnOnce(Vec<TranscriptRecord>) -> Vec<TranscriptRecord>,
    {
        Self {
            headers: self.headers,
            layout: self.layout,
            records: f(self.records),
        }
    }

    /// Write the table as UTF-8 CSV with its original header.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = get_writer(path.as_ref(), b',', true)?;
        self.write_to(&mut writer)
    }

    pub fn write_to<W: Write>(&self, writer: &mut csv::Writer<W>) -> Result<()> {
        writer.write_record(&self.headers)?;
        for record in &self.records {
            writer.write_record(&record.to_row(&self.layout))?;
        }
        writer.flush()?;
        Ok(())
    }
}
