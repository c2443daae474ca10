//! Feature type annotation for `features.tsv`.

/// Feature type column understood by Seurat and Scanpy 10x readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureCategory {
    GeneExpression,
    NegativeControlProbe,
    NegativeControlCodeword,
    BlankCodeword,
}

impl FeatureCategory {
    /// Categorize a gene identifier by its prefix.
    pub fn of(gene: &str) -> Self {
        if gene.starts_with("NegControlProbe_") || gene.starts_with("antisense_") {
            FeatureCategory::NegativeControlProbe
        } else if gene.starts_with("NegControlCodeword_") {
            FeatureCategory::NegativeControlCodeword
        } else if gene.starts_with("BLANK_") {
            FeatureCategory::BlankCodeword
        } else {
            FeatureCategory::GeneExpression
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureCategory::GeneExpression => "Gene Expression",
            FeatureCategory::NegativeControlProbe => "Negative Control Probe",
            FeatureCategory::NegativeControlCodeword => "Negative Control Codeword",
            FeatureCategory::BlankCodeword => "Blank Codeword",
        }
    }
}
