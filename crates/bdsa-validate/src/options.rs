use bdsa_model::{CanonicalField, ColumnMapping, HistogramMode};

/// Caller toggles for a validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    pub stain_histogram: HistogramMode,
    pub region_histogram: HistogramMode,
    /// Consulted after the standardized field and before the alias list.
    pub mapping: Option<ColumnMapping>,
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stain_histogram(mut self, mode: HistogramMode) -> Self {
        self.stain_histogram = mode;
        self
    }

    pub fn with_region_histogram(mut self, mode: HistogramMode) -> Self {
        self.region_histogram = mode;
        self
    }

    pub fn with_mapping(mut self, mapping: ColumnMapping) -> Self {
        self.mapping = Some(mapping);
        self
    }

    /// Histogram mode for a governed field; `None` for caseID.
    pub fn histogram_mode(&self, field: CanonicalField) -> Option<HistogramMode> {
        match field {
            CanonicalField::StainId => Some(self.stain_histogram),
            CanonicalField::RegionName => Some(self.region_histogram),
            CanonicalField::CaseId => None,
        }
    }
}
