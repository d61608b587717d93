//! Mapping suggestions for datasets that arrive without a column mapping.
//!
//! Each canonical field is scored against every source column. An alias match
//! (ignoring case and separators) scores 1.0; anything else is scored with
//! Jaro-Winkler similarity against the field's aliases. Assignment is greedy by
//! score so a column backs at most one field.

use std::cmp::Ordering;

use rapidfuzz::distance::jaro_winkler::similarity as jaro_similarity;
use serde::Serialize;
use tracing::debug;

use bdsa_model::{CanonicalField, ColumnMapping};

use crate::utils::compact_key;

/// Default minimum score for a suggestion to be kept.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.85;

/// A proposed source column for one canonical field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingSuggestion {
    pub field: CanonicalField,
    pub source_column: String,
    pub confidence: f32,
    /// True when the column matched an alias outright.
    pub exact: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResult {
    /// In standardized field order.
    pub suggestions: Vec<MappingSuggestion>,
    pub unmapped_fields: Vec<CanonicalField>,
}

impl SuggestionResult {
    pub fn suggestion(&self, field: CanonicalField) -> Option<&MappingSuggestion> {
        self.suggestions.iter().find(|s| s.field == field)
    }

    /// Column mapping holding every suggestion.
    pub fn to_mapping(&self) -> ColumnMapping {
        self.suggestions
            .iter()
            .fold(ColumnMapping::new(), |mapping, suggestion| {
                mapping.with(suggestion.field, suggestion.source_column.clone())
            })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Suggester {
    min_confidence: f32,
}

impl Default for Suggester {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CONFIDENCE)
    }
}

impl Suggester {
    /// Thresholds are clamped to 0..1; a non-finite value falls back to
    /// [`DEFAULT_MIN_CONFIDENCE`].
    pub fn new(min_confidence: f32) -> Self {
        let min_confidence = if min_confidence.is_finite() {
            min_confidence.clamp(0.0, 1.0)
        } else {
            DEFAULT_MIN_CONFIDENCE
        };
        Self { min_confidence }
    }

    pub fn min_confidence(&self) -> f32 {
        self.min_confidence
    }

    pub fn suggest<S: AsRef<str>>(&self, columns: &[S]) -> SuggestionResult {
        let mut candidates: Vec<Candidate> = Vec::new();
        for (field_index, field) in CanonicalField::STANDARDIZED_ORDER.iter().enumerate() {
            for (column_index, column) in columns.iter().enumerate() {
                let column = column.as_ref();
                // Output columns never feed back into the mapping.
                if CanonicalField::is_standardized_name(column) {
                    continue;
                }
                let (score, exact) = score_column(*field, column);
                if score >= self.min_confidence {
                    candidates.push(Candidate {
                        field: *field,
                        field_index,
                        column_index,
                        column,
                        score,
                        exact,
                    });
                }
            }
        }

        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then(a.field_index.cmp(&b.field_index))
                .then(a.column_index.cmp(&b.column_index))
        });

        let mut taken_fields: Vec<CanonicalField> = Vec::new();
        let mut taken_columns: Vec<usize> = Vec::new();
        let mut suggestions = Vec::new();
        for candidate in candidates {
            if taken_fields.contains(&candidate.field)
                || taken_columns.contains(&candidate.column_index)
            {
                continue;
            }
            debug!(
                field = %candidate.field,
                column = candidate.column,
                confidence = candidate.score,
                "suggested column"
            );
            taken_fields.push(candidate.field);
            taken_columns.push(candidate.column_index);
            suggestions.push(MappingSuggestion {
                field: candidate.field,
                source_column: candidate.column.to_string(),
                confidence: candidate.score,
                exact: candidate.exact,
            });
        }
        suggestions.sort_by_key(|s| field_position(s.field));

        let unmapped_fields = CanonicalField::STANDARDIZED_ORDER
            .iter()
            .copied()
            .filter(|field| !taken_fields.contains(field))
            .collect();

        SuggestionResult {
            suggestions,
            unmapped_fields,
        }
    }
}

/// Suggest a mapping for `columns` with the given minimum confidence.
pub fn suggest_mapping<S: AsRef<str>>(columns: &[S], min_confidence: f32) -> SuggestionResult {
    Suggester::new(min_confidence).suggest(columns)
}

struct Candidate<'a> {
    field: CanonicalField,
    field_index: usize,
    column_index: usize,
    column: &'a str,
    score: f32,
    exact: bool,
}

fn field_position(field: CanonicalField) -> usize {
    CanonicalField::STANDARDIZED_ORDER
        .iter()
        .position(|f| *f == field)
        .unwrap_or(usize::MAX)
}

fn score_column(field: CanonicalField, column: &str) -> (f32, bool) {
    let key = compact_key(column);
    if key.is_empty() {
        return (0.0, false);
    }
    let mut best = 0.0_f64;
    for alias in field.aliases() {
        let alias_key = compact_key(alias);
        if alias_key == key {
            return (1.0, true);
        }
        let score = jaro_similarity(alias_key.chars(), key.chars());
        if score > best {
            best = score;
        }
    }
    (best as f32, false)
}
