//! Shim dictionary: synonym tables mapping raw vocabulary variants onto
//! canonical controlled-vocabulary terms.
//!
//! ## Document shape
//!
//! ```text
//! { "<field>": { "<canonical value>": ["<synonym>", ...], ... }, ... }
//! ```
//!
//! Declaration order is preserved at both levels. When the same raw value is
//! listed under more than one canonical value, the first-declared canonical
//! value wins.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Synonym table for a single governed field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSynonyms {
    terms: IndexMap<String, Vec<String>>,
}

impl FieldSynonyms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a canonical value with its synonyms, extending an existing
    /// entry in place.
    pub fn add_term<I, S>(&mut self, canonical: impl Into<String>, synonyms: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.terms
            .entry(canonical.into())
            .or_default()
            .extend(synonyms.into_iter().map(Into::into));
    }

    /// True when `value` is itself a canonical key.
    pub fn is_canonical(&self, value: &str) -> bool {
        self.terms.contains_key(value)
    }

    /// First-declared canonical value whose synonym list contains `raw`.
    pub fn canonical_for(&self, raw: &str) -> Option<&str> {
        self.terms
            .iter()
            .find(|(_, synonyms)| synonyms.iter().any(|s| s == raw))
            .map(|(canonical, _)| canonical.as_str())
    }

    /// Canonical values with their synonyms, in declaration order.
    pub fn terms(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.terms.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Field name → [`FieldSynonyms`], in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "IndexMap<String, FieldSynonyms>")]
pub struct ShimDictionary {
    fields: IndexMap<String, FieldSynonyms>,
}

impl ShimDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field: impl Into<String>, synonyms: FieldSynonyms) -> Self {
        self.fields.insert(field.into(), synonyms);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldSynonyms> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSynonyms)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    /// Build from a parsed JSON document, failing on any non-object level or
    /// non-string synonym.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(root) = value else {
            return Err(ModelError::ShimDictionary(
                "top level must be an object of field names".to_string(),
            ));
        };
        let mut dictionary = ShimDictionary::new();
        for (field, table) in root {
            let serde_json::Value::Object(table) = table else {
                return Err(ModelError::ShimDictionary(format!(
                    "entry for '{field}' must be an object of canonical values"
                )));
            };
            let mut synonyms = FieldSynonyms::new();
            for (canonical, raw_synonyms) in table {
                let serde_json::Value::Array(items) = raw_synonyms else {
                    return Err(ModelError::ShimDictionary(format!(
                        "synonyms for '{field}.{canonical}' must be a list"
                    )));
                };
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    let serde_json::Value::String(text) = item else {
                        return Err(ModelError::ShimDictionary(format!(
                            "synonyms for '{field}.{canonical}' must be strings"
                        )));
                    };
                    values.push(text);
                }
                synonyms.add_term(canonical, values);
            }
            dictionary.fields.insert(field, synonyms);
        }
        Ok(dictionary)
    }
}

impl TryFrom<serde_json::Value> for ShimDictionary {
    type Error = ModelError;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl From<ShimDictionary> for IndexMap<String, FieldSynonyms> {
    fn from(dictionary: ShimDictionary) -> Self {
        dictionary.fields
    }
}
