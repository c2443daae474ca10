//! Xenium transcript filtering
//!
//! Loads a `transcripts.csv(.gz)` table, drops low quality, out-of-window and
//! control-probe transcripts, renames cell-free transcripts from cell `-1` to
//! `0` and writes the survivors to a CSV named after the spatial window.
//!
//! # Key Components
//!
//! - [`table`]: In-memory transcript table, loading and CSV output
//! - [`filter`]: Quality, spatial window and control probe predicates
//! - [`normalize`]: Cell-free `cell_id` rewrite
//! - [`naming`]: Output file name derived from the spatial window

pub mod filter;
pub mod naming;
pub mod normalize;
pub mod table;

pub use filter::{FilterStats, SpatialWindow, TranscriptFilter};
pub use naming::filtered_file_name;
pub use table::{TranscriptRecord, TranscriptTable};

/// Summary of one filter + normalize pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    pub stats: FilterStats,
    pub cell_free_rewritten: usize,
}

/// Filter a loaded table and normalize the cell ids of the surviving rows.
pub fn filter_table(
    table: TranscriptTable,
    filter: &TranscriptFilter,
) -> (TranscriptTable, FilterOutcome) {
    let mut outcome = FilterOutcome::default();
    let table = table.map_records(|records| {
        let (kept, stats) = filter.apply(records);
        let (normalized, rewritten) = normalize::normalize_all(kept);
        outcome.stats = stats;
        outcome.cell_free_rewritten = rewritten;
        normalized
    });
    (table, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Result;
    use std::path::Path;

    #[test]
    fn filtered_rows_satisfy_every_predicate() -> Result<()> {
        let body = "\
transcript_id,cell_id,overlaps_nucleus,feature_name,x_location,y_location,z_location,qv
1,-1,0,ACTB,5.0,5.0,1.0,30.0
2,7,1,GAPDH,5.0,5.0,1.0,10.0
3,8,1,BLANK_0001,5.0,5.0,1.0,30.0
4,-1,0,MYC,50.0,5.0,1.0,30.0
5,9,1,CD3E,5.0,50.0,1.0,30.0
6,9,1,CD3E,10.0,10.0,1.0,20.0
";
        let mut reader = csv::ReaderBuilder::new().from_reader(body.as_bytes());
        let table = TranscriptTable::from_reader(&mut reader, Path::new("transcripts.csv"))?;
        let window = SpatialWindow {
            min_x: 0.0,
            max_x: 10.0,
            min_y: 0.0,
            max_y: 10.0,
        };
        let transcript_filter = TranscriptFilter::new(20.0, window)?;

        let (filtered, outcome) = filter_table(table, &transcript_filter);
        let ids: Vec<&str> = filtered
            .records()
            .iter()
            .map(|r| r.feature_name.as_str())
            .collect();
        assert_eq!(ids, vec!["ACTB", "CD3E"]);
        assert_eq!(outcome.stats.kept, 2);
        assert_eq!(outcome.stats.dropped(), 4);
        assert_eq!(outcome.cell_free_rewritten, 1);

        for record in filtered.records() {
            assert!(record.quality_value >= 20.0);
            assert!(window.contains(record.x_location, record.y_location));
            assert!(!filter::is_control_probe(&record.feature_name));
            assert_ne!(record.cell_id, "-1");
        }

        let (again, second) = filter_table(filtered.clone(), &transcript_filter);
        assert_eq!(again.records(), filtered.records());
        assert_eq!(second.stats.dropped(), 0);
        Ok(())
    }
}
