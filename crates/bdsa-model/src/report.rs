//! Schema-conformance statistics.

use indexmap::IndexMap;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::fields::CanonicalField;

/// Display text for a field whose column could not be resolved.
pub const NOT_FOUND_TEXT: &str = "Column not found or not mapped";

/// `"{count} ({pct:.2}%)"`; an empty dataset always renders `"0 (0.00%)"`.
pub fn format_percentage(count: usize, total: usize) -> String {
    if total == 0 {
        return "0 (0.00%)".to_string();
    }
    let pct = count as f64 / total as f64 * 100.0;
    format!("{count} ({pct:.2}%)")
}

/// Which values a histogram counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistogramMode {
    Valid,
    /// Surfaces the vocabulary that still needs dictionary entries.
    #[default]
    Invalid,
}

impl HistogramMode {
    /// Map a boolean "show unmapped values" switch.
    pub fn from_switch(show_invalid: bool) -> Self {
        if show_invalid {
            Self::Invalid
        } else {
            Self::Valid
        }
    }

    pub fn admits(self, is_valid: bool) -> bool {
        match self {
            Self::Valid => is_valid,
            Self::Invalid => !is_valid,
        }
    }
}

/// Insertion-ordered value → occurrence count accumulator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValueCounts {
    counts: IndexMap<String, usize>,
}

impl ValueCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, value: &str) {
        if let Some(count) = self.counts.get_mut(value) {
            *count += 1;
        } else {
            self.counts.insert(value.to_string(), 1);
        }
    }

    pub fn get(&self, value: &str) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Values in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Descending by count; ties keep first-occurrence order.
    pub fn most_common(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for ValueCounts {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut counts = Self::new();
        for value in iter {
            counts.record(value);
        }
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Histogram {
    pub mode: HistogramMode,
    pub counts: ValueCounts,
}

/// Counts for a field whose column was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldStats {
    /// Column the values were read from.
    pub column: String,
    pub valid_count: usize,
    pub invalid_count: usize,
    pub percentage_text: String,
}

impl FieldStats {
    pub fn new(column: impl Into<String>, valid_count: usize, total: usize) -> Self {
        Self {
            column: column.into(),
            valid_count,
            invalid_count: total.saturating_sub(valid_count),
            percentage_text: format_percentage(valid_count, total),
        }
    }

    pub fn total(&self) -> usize {
        self.valid_count + self.invalid_count
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    Resolved(FieldStats),
    NotFound,
}

impl FieldOutcome {
    pub fn stats(&self) -> Option<&FieldStats> {
        match self {
            Self::Resolved(stats) => Some(stats),
            Self::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn display_text(&self) -> &str {
        match self {
            Self::Resolved(stats) => &stats.percentage_text,
            Self::NotFound => NOT_FOUND_TEXT,
        }
    }
}

impl Serialize for FieldOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Resolved(stats) => stats.serialize(serializer),
            Self::NotFound => serializer.serialize_str("not found"),
        }
    }
}

/// Conjunctive "usable file" metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileValidity {
    pub valid_count: usize,
    pub percentage_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub total_rows: usize,
    pub files: FileValidity,
    /// caseID, stainID, regionName, in that order.
    pub fields: IndexMap<CanonicalField, FieldOutcome>,
    /// One entry per governed field with a resolved column.
    pub histograms: IndexMap<CanonicalField, Histogram>,
}

impl ValidationReport {
    pub fn field(&self, field: CanonicalField) -> Option<&FieldOutcome> {
        self.fields.get(&field)
    }

    pub fn stats(&self, field: CanonicalField) -> Option<&FieldStats> {
        self.field(field).and_then(FieldOutcome::stats)
    }

    pub fn histogram(&self, field: CanonicalField) -> Option<&Histogram> {
        self.histograms.get(&field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_text_formats_two_decimals() {
        assert_eq!(format_percentage(3, 4), "3 (75.00%)");
        assert_eq!(format_percentage(1, 3), "1 (33.33%)");
        assert_eq!(format_percentage(0, 0), "0 (0.00%)");
        assert_eq!(format_percentage(0, 7), "0 (0.00%)");
    }

    #[test]
    fn most_common_is_stable_on_ties() {
        let counts: ValueCounts = ["b", "a", "b", "c", "a", "d"].into_iter().collect();
        assert_eq!(
            counts.most_common(),
            vec![("b", 2), ("a", 2), ("c", 1), ("d", 1)]
        );
        assert_eq!(counts.total(), 6);
    }

    #[test]
    fn not_found_serializes_as_text() {
        let json = serde_json::to_value(FieldOutcome::NotFound).unwrap();
        assert_eq!(json, serde_json::json!("not found"));
        let json = serde_json::to_value(FieldOutcome::Resolved(FieldStats::new("stainID", 3, 4)))
            .unwrap();
        assert_eq!(json["validCount"], 3);
        assert_eq!(json["invalidCount"], 1);
        assert_eq!(json["percentageText"], "3 (75.00%)");
    }
}
