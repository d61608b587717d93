//! Shim resolution: raw field values → canonical vocabulary terms.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use bdsa_model::{CanonicalField, Dataset, FieldSynonyms, Row, ShimDictionary};

/// Normalized dataset and the number of values rewritten per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShimOutcome {
    pub dataset: Dataset,
    pub rewrites: IndexMap<String, FieldRewrites>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRewrites {
    /// Values replaced by a canonical term.
    pub rewritten: usize,
    /// Values that were already canonical.
    pub canonical: usize,
    /// Values with no dictionary entry.
    pub unmatched: usize,
}

impl ShimOutcome {
    pub fn total_rewritten(&self) -> usize {
        self.rewrites.values().map(|r| r.rewritten).sum()
    }
}

pub fn resolve(dataset: &Dataset, dictionary: &ShimDictionary) -> Dataset {
    resolve_with_outcome(dataset, dictionary).dataset
}

/// Apply the dictionary to every field present in both the dataset and the
/// dictionary.
///
/// A value that is already a canonical key is never touched. Otherwise the
/// first-declared canonical value listing it as a synonym replaces it. The
/// empty string matches like any other value, so a row without the field
/// gains it when `""` is a declared synonym.
pub fn resolve_with_outcome(dataset: &Dataset, dictionary: &ShimDictionary) -> ShimOutcome {
    let mut rows: Vec<Row> = dataset.rows().to_vec();
    let mut rewrites = IndexMap::new();

    for (field, synonyms) in dictionary.fields() {
        if !dataset.has_column(field) {
            debug!(field, "dictionary field absent from dataset");
            continue;
        }
        let table = SynonymTable::build(synonyms);
        let mut counts = FieldRewrites::default();
        for row in &mut rows {
            let value = row.value(field);
            if synonyms.is_canonical(value) {
                counts.canonical += 1;
                continue;
            }
            match table.lookup(value) {
                Some(canonical) => {
                    let canonical = canonical.to_string();
                    row.insert(field, canonical);
                    counts.rewritten += 1;
                }
                None => counts.unmatched += 1,
            }
        }
        debug!(
            field,
            rewritten = counts.rewritten,
            canonical = counts.canonical,
            unmatched = counts.unmatched,
            "shim dictionary applied"
        );
        rewrites.insert(field.to_string(), counts);
    }

    ShimOutcome {
        dataset: Dataset::with_columns(dataset.columns().to_vec(), rows),
        rewrites,
    }
}

/// Copy each canonical field's synonym table onto its standardized column
/// (`stainID` → `bdsaStainID`) so a mapped dataset is normalized in place.
/// An explicit entry for a standardized name is kept as declared.
pub fn extend_to_standardized(dictionary: &ShimDictionary) -> ShimDictionary {
    let mut extended = dictionary.clone();
    for (field, synonyms) in dictionary.fields() {
        let Ok(canonical) = field.parse::<CanonicalField>() else {
            continue;
        };
        let standardized = canonical.standardized();
        if extended.field(standardized).is_none() {
            extended = extended.with_field(standardized, synonyms.clone());
        }
    }
    extended
}

/// Synonym → canonical lookup for one field. Only the first canonical value
/// declaring a synonym is kept.
struct SynonymTable<'a> {
    entries: HashMap<&'a str, &'a str>,
}

impl<'a> SynonymTable<'a> {
    fn build(synonyms: &'a FieldSynonyms) -> Self {
        let mut entries = HashMap::new();
        for (canonical, raw_values) in synonyms.terms() {
            for raw in raw_values {
                entries.entry(raw.as_str()).or_insert(canonical);
            }
        }
        Self { entries }
    }

    fn lookup(&self, raw: &str) -> Option<&'a str> {
        self.entries.get(raw).copied()
    }
}
