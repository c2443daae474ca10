//! Quality, spatial-window and control-probe filtering of transcripts.

use crate::core::error::{Result, XenprepError};
use crate::core::record_filter::RecordFilter;
use crate::pipeline::transcripts::table::TranscriptRecord;

/// Feature name prefixes of synthetic control probes and codewords.
pub const CONTROL_PROBE_PREFIXES: [&str; 4] = [
    "NegControlProbe_",
    "antisense_",
    "NegControlCodeword_",
    "BLANK_",
];

pub const DEFAULT_MIN_QV: f64 = 20.0;
/// Xenium slides are smaller than 24000 microns in x and y.
pub const DEFAULT_MAX_COORD: f64 = 24000.0;

/// Returns `true` when a feature name denotes a control probe or codeword.
#[inline]
pub fn is_control_probe(feature_name: &str) -> bool {
    CONTROL_PROBE_PREFIXES
        .iter()
        .any(|prefix| feature_name.starts_with(prefix))
}

/// Closed rectangle in slide coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialWindow {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Default for SpatialWindow {
    fn default() -> Self {
        Self {
            min_x: 0.0,
            max_x: DEFAULT_MAX_COORD,
            min_y: 0.0,
            max_y: DEFAULT_MAX_COORD,
        }
    }
}

impl SpatialWindow {
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.min_x <= x && x <= self.max_x && self.min_y <= y && y <= self.max_y
    }

    /// An inverted window admits no point at all.
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }
}

/// Why a transcript was kept or dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    LowQuality,
    OutOfBounds,
    ControlProbe,
}

/// Per-reason tallies from one filtering pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub kept: usize,
    pub low_quality: usize,
    pub out_of_bounds: usize,
    pub control_probe: usize,
}

impl FilterStats {
    pub fn dropped(&self) -> usize {
        self.low_quality + self.out_of_bounds + self.control_probe
    }

    fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Keep => self.kept += 1,
            Verdict::LowQuality => self.low_quality += 1,
            Verdict::OutOfBounds => self.out_of_bounds += 1,
            Verdict::ControlProbe => self.control_probe += 1,
        }
    }
}

/// Transcript filter with a minimum quality score and a spatial window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranscriptFilter {
    min_qv: f64,
    window: SpatialWindow,
}

impl TranscriptFilter {
    /// Build a filter, rejecting NaN thresholds or bounds.
    pub fn new(min_qv: f64, window: SpatialWindow) -> Result<Self> {
        for (field, value) in [
            ("min_qv", min_qv),
            ("min_x", window.min_x),
            ("max_x", window.max_x),
            ("min_y", window.min_y),
            ("max_y", window.max_y),
        ] {
            if value.is_nan() {
                return Err(XenprepError::ThresholdValidation {
                    field: field.to_string(),
                    value,
                });
            }
        }

        if window.is_empty() {
            log::warn!(
                "Spatial window x=[{}, {}] y=[{}, {}] is empty; no transcript will pass",
                window.min_x,
                window.max_x,
                window.min_y,
                window.max_y
            );
        }

        Ok(Self { min_qv, window })
    }

    pub fn min_qv(&self) -> f64 {
        self.min_qv
    }

    pub fn window(&self) -> &SpatialWindow {
        &self.window
    }

    /// Classify a single transcript. Checks run quality, bounds, then control probe.
    pub fn classify(&self, record: &TranscriptRecord) -> Verdict {
        if record.quality_value.is_nan() || record.quality_value < self.min_qv {
            Verdict::LowQuality
        } else if !self.window.contains(record.x_location, record.y_location) {
            Verdict::OutOfBounds
        } else if is_control_probe(&record.feature_name) {
            Verdict::ControlProbe
        } else {
            Verdict::Keep
        }
    }

    /// Stable filter over owned records, returning survivors and tallies.
    pub fn apply(&self, records: Vec<TranscriptRecord>) -> (Vec<TranscriptRecord>, FilterStats) {
        let mut stats = FilterStats::default();
        let kept = records
            .into_iter()
            .filter(|record| {
                let verdict = self.classify(record);
                stats.record(verdict);
                verdict == Verdict::Keep
            })
            .collect();
        (kept, stats)
    }
}

impl RecordFilter<TranscriptRecord> for TranscriptFilter {
    #[inline]
    fn filter_record(&self, record: &TranscriptRecord) -> bool {
        self.classify(record) == Verdict::Keep
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record_filter::retain_passing;
    use crate::pipeline::transcripts::table::ColumnLayout;
    use csv::StringRecord;

    const LAYOUT: ColumnLayout = ColumnLayout {
        quality_value: 0,
        x_location: 1,
        y_location: 2,
        feature_name: 3,
        cell_id: 4,
    };

    fn transcript(qv: f64, x: f64, y: f64, feature: &str) -> TranscriptRecord {
        let row = StringRecord::from(vec![
            qv.to_string(),
            x.to_string(),
            y.to_string(),
            feature.to_string(),
            "1".to_string(),
        ]);
        TranscriptRecord::from_row(row, &LAYOUT, 2).unwrap()
    }

    fn window(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> SpatialWindow {
        SpatialWindow {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    #[test]
    fn control_probe_prefixes_are_matched() {
        assert!(is_control_probe("NegControlProbe_00031"));
        assert!(is_control_probe("antisense_PROKR2"));
        assert!(is_control_probe("NegControlCodeword_0500"));
        assert!(is_control_probe("BLANK_0006"));
        assert!(!is_control_probe("ACTB"));
        assert!(!is_control_probe("blank_0006"));
        assert!(!is_control_probe("XBLANK_1"));
    }

    #[test]
    fn bounds_and_quality_are_inclusive() -> Result<()> {
        let filter = TranscriptFilter::new(20.0, window(0.0, 100.0, 10.0, 50.0))?;
        assert_eq!(filter.classify(&transcript(20.0, 0.0, 10.0, "ACTB")), Verdict::Keep);
        assert_eq!(filter.classify(&transcript(20.0, 100.0, 50.0, "ACTB")), Verdict::Keep);
        assert_eq!(
            filter.classify(&transcript(19.99, 50.0, 20.0, "ACTB")),
            Verdict::LowQuality
        );
        assert_eq!(
            filter.classify(&transcript(30.0, 100.5, 20.0, "ACTB")),
            Verdict::OutOfBounds
        );
        assert_eq!(
            filter.classify(&transcript(30.0, 50.0, 50.5, "ACTB")),
            Verdict::OutOfBounds
        );
        assert_eq!(
            filter.classify(&transcript(30.0, 50.0, 9.0, "ACTB")),
            Verdict::OutOfBounds
        );
        assert_eq!(
            filter.classify(&transcript(30.0, 50.0, 20.0, "BLANK_0001")),
            Verdict::ControlProbe
        );
        Ok(())
    }

    #[test]
    fn apply_is_stable_and_counts_reasons() -> Result<()> {
        let filter = TranscriptFilter::new(20.0, window(0.0, 10.0, 0.0, 10.0))?;
        let records = vec![
            transcript(30.0, 1.0, 1.0, "GENE_A"),
            transcript(5.0, 1.0, 1.0, "GENE_B"),
            transcript(30.0, 2.0, 2.0, "GENE_C"),
            transcript(30.0, 20.0, 1.0, "GENE_D"),
            transcript(30.0, 3.0, 3.0, "antisense_E"),
            transcript(30.0, 4.0, 4.0, "GENE_F"),
        ];

        let (kept, stats) = filter.apply(records);
        let names: Vec<&str> = kept.iter().map(|r| r.feature_name.as_str()).collect();
        assert_eq!(names, vec!["GENE_A", "GENE_C", "GENE_F"]);
        assert_eq!(
            stats,
            FilterStats {
                kept: 3,
                low_quality: 1,
                out_of_bounds: 1,
                control_probe: 1,
            }
        );
        assert_eq!(stats.dropped(), 3);
        Ok(())
    }

    #[test]
    fn refiltering_is_idempotent() -> Result<()> {
        let filter = TranscriptFilter::new(25.0, window(0.0, 5.0, 0.0, 5.0))?;
        let records = vec![
            transcript(30.0, 1.0, 1.0, "A"),
            transcript(24.0, 1.0, 1.0, "B"),
            transcript(30.0, 6.0, 1.0, "C"),
            transcript(30.0, 5.0, 5.0, "D"),
        ];
        let once = retain_passing(records, &filter);
        let twice = retain_passing(once.clone(), &filter);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
        Ok(())
    }

    #[test]
    fn inverted_window_keeps_nothing() -> Result<()> {
        let filter = TranscriptFilter::new(0.0, window(10.0, 5.0, 0.0, 100.0))?;
        assert!(filter.window().is_empty());
        let (kept, stats) = filter.apply(vec![
            transcript(30.0, 7.0, 1.0, "A"),
            transcript(30.0, 10.0, 1.0, "B"),
        ]);
        assert!(kept.is_empty());
        assert_eq!(stats.out_of_bounds, 2);
        Ok(())
    }

    #[test]
    fn nan_threshold_is_rejected() {
        let err = TranscriptFilter::new(f64::NAN, SpatialWindow::default()).unwrap_err();
        assert!(matches!(err, XenprepError::ThresholdValidation { .. }));
        let mut bad = SpatialWindow::default();
        bad.max_y = f64::NAN;
        assert!(TranscriptFilter::new(20.0, bad).is_err());
    }
}
