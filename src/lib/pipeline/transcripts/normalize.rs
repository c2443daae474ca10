//! Cell-free transcript id normalization.
//!
//! Xenium marks transcripts outside any cell with `cell_id == -1`, while
//! downstream consumers expect `0`. The rewrite is a value-in/value-out
//! transform so the rest of the record is never touched.

use crate::pipeline::transcripts::table::TranscriptRecord;

/// Cell id Xenium assigns to cell-free transcripts.
pub const CELL_FREE_SENTINEL: i64 = -1;
/// Cell id written in its place.
pub const CELL_FREE_ID: &str = "0";

/// Returns `true` when the raw cell id is the integer `-1`.
#[inline]
pub fn is_cell_free(cell_id: &str) -> bool {
    cell_id.trim().parse::<i64>() == Ok(CELL_FREE_SENTINEL)
}

/// Rewrite the cell-free sentinel; every other cell id passes through unchanged.
pub fn normalize(mut record: TranscriptRecord) -> TranscriptRecord {
    if is_cell_free(&record.cell_id) {
        record.cell_id = CELL_FREE_ID.to_string();
    }
    record
}

/// Normalize a batch, returning the records and how many were rewritten.
pub fn normalize_all(records: Vec<TranscriptRecord>) -> (Vec<TranscriptRecord>, usize) {
    let mut rewritten = 0usize;
    let records = records
        .into_iter()
        .map(|record| {
            if is_cell_free(&record.cell_id) {
                rewritten += 1;
            }
            normalize(record)
        })
        .collect();
    (records, rewritten)
}
