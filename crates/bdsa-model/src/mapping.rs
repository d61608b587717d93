use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::fields::CanonicalField;

/// Which source column supplies each canonical field.
///
/// Serialized as `{ "<canonicalField>": "<sourceColumnName>" }`. A field
/// without an entry is unmapped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct ColumnMapping {
    entries: BTreeMap<CanonicalField, String>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: CanonicalField, column: impl Into<String>) -> Self {
        self.assign(field, column);
        self
    }

    /// Apply a user selection. An empty column name clears the mapping.
    pub fn assign(&mut self, field: CanonicalField, column: impl Into<String>) {
        let column = column.into();
        if column.is_empty() {
            self.entries.remove(&field);
        } else {
            self.entries.insert(field, column);
        }
    }

    pub fn get(&self, field: CanonicalField) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    pub fn is_mapped(&self, field: CanonicalField) -> bool {
        self.entries.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &str)> {
        self.entries.iter().map(|(f, c)| (*f, c.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(ModelError::ColumnMapping(
                "expected a JSON object of canonical field to column name".to_string(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }
}

impl TryFrom<BTreeMap<String, String>> for ColumnMapping {
    type Error = ModelError;

    fn try_from(raw: BTreeMap<String, String>) -> Result<Self> {
        let mut mapping = ColumnMapping::new();
        for (key, column) in raw {
            let field: CanonicalField = key.parse()?;
            mapping.assign(field, column);
        }
        Ok(mapping)
    }
}

impl From<ColumnMapping> for BTreeMap<String, String> {
    fn from(mapping: ColumnMapping) -> Self {
        mapping
            .entries
            .into_iter()
            .map(|(field, column)| (field.as_str().to_string(), column))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_clears_entry() {
        let mut mapping = ColumnMapping::new().with(CanonicalField::StainId, "Stain Name");
        assert_eq!(mapping.get(CanonicalField::StainId), Some("Stain Name"));
        mapping.assign(CanonicalField::StainId, "");
        assert!(!mapping.is_mapped(CanonicalField::StainId));
    }

    #[test]
    fn parses_json_document() {
        let mapping =
            ColumnMapping::from_json_str(r#"{"caseID": "Case_Num", "regionName": ""}"#).unwrap();
        assert_eq!(mapping.get(CanonicalField::CaseId), Some("Case_Num"));
        assert!(!mapping.is_mapped(CanonicalField::RegionName));
    }

    #[test]
    fn rejects_unknown_field_and_non_object() {
        assert!(ColumnMapping::from_json_str(r#"{"blockID": "x"}"#).is_err());
        assert!(ColumnMapping::from_json_str(r#"["caseID"]"#).is_err());
    }
}
