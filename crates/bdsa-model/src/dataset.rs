//! Row-oriented tabular data.
//!
//! A [`Dataset`] is an ordered sequence of [`Row`]s. Rows do not have to share
//! the same fields; a field a row does not carry reads as the empty string.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// An ordered field → value mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IndexMap<String, serde_json::Value>")]
pub struct Row {
    #[serde(flatten)]
    fields: IndexMap<String, String>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    /// Raw lookup; `None` when the row does not carry the field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Empty-filled lookup.
    pub fn value(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Sets a field, keeping its position if it already exists.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl TryFrom<IndexMap<String, serde_json::Value>> for Row {
    type Error = ModelError;

    /// Scalars become text and `null` becomes the empty string; nested arrays
    /// or objects are not tabular.
    fn try_from(raw: IndexMap<String, serde_json::Value>) -> Result<Self, Self::Error> {
        let mut row = Row::with_capacity(raw.len());
        for (field, value) in raw {
            let text = match value {
                serde_json::Value::Null => String::new(),
                serde_json::Value::String(text) => text,
                serde_json::Value::Bool(flag) => flag.to_string(),
                serde_json::Value::Number(number) => number.to_string(),
                serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                    return Err(ModelError::NonTabular { field });
                }
            };
            row.fields.insert(field, text);
        }
        Ok(row)
    }
}

/// A finite sequence of rows plus the union of their field names in
/// first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Row>", into = "Vec<Row>")]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset, deriving the column list from the rows.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut columns: IndexMap<&str, ()> = IndexMap::new();
        for row in &rows {
            for name in row.field_names() {
                columns.entry(name).or_insert(());
            }
        }
        let columns = columns.into_keys().map(str::to_string).collect();
        Self { columns, rows }
    }

    /// Build a dataset with an explicit column order. Columns named by rows
    /// but missing from `columns` are appended in first-seen order.
    pub fn with_columns(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let mut ordered: IndexMap<String, ()> = columns.into_iter().map(|c| (c, ())).collect();
        for row in &rows {
            for name in row.field_names() {
                if !ordered.contains_key(name) {
                    ordered.insert(name.to_string(), ());
                }
            }
        }
        Self {
            columns: ordered.into_keys().collect(),
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Empty-filled values of one column, in row order.
    pub fn column_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.rows.iter().map(move |row| row.value(name))
    }

    /// True when the column exists and at least one row has a non-empty value.
    pub fn has_values(&self, name: &str) -> bool {
        self.has_column(name) && self.column_values(name).any(|v| !v.is_empty())
    }
}

impl From<Vec<Row>> for Dataset {
    fn from(rows: Vec<Row>) -> Self {
        Self::from_rows(rows)
    }
}

impl From<Dataset> for Vec<Row> {
    fn from(dataset: Dataset) -> Self {
        dataset.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_follow_first_seen_order() {
        let rows = vec![
            Row::from_iter([("a", "1"), ("b", "2")]),
            Row::from_iter([("c", "3"), ("a", "4")]),
        ];
        let dataset = Dataset::from_rows(rows);
        assert_eq!(dataset.columns(), ["a", "b", "c"]);
    }

    #[test]
    fn missing_fields_read_as_empty() {
        let dataset = Dataset::from_rows(vec![
            Row::from_iter([("a", "1")]),
            Row::from_iter([("b", "2")]),
        ]);
        let values: Vec<&str> = dataset.column_values("a").collect();
        assert_eq!(values, vec!["1", ""]);
        assert!(dataset.has_values("b"));
        assert!(!dataset.has_values("zzz"));
    }

    #[test]
    fn deserializes_scalars_and_nulls() {
        let json = r#"[{"a": "x", "b": 3, "c": null, "d": true}]"#;
        let dataset: Dataset = serde_json::from_str(json).expect("dataset");
        let row = &dataset.rows()[0];
        assert_eq!(row.value("a"), "x");
        assert_eq!(row.value("b"), "3");
        assert_eq!(row.value("c"), "");
        assert_eq!(row.value("d"), "true");
        assert_eq!(dataset.columns(), ["a", "b", "c", "d"]);
    }

    #[test]
    fn rejects_nested_values() {
        let json = r#"[{"a": ["x"]}]"#;
        assert!(serde_json::from_str::<Dataset>(json).is_err());
        assert!(serde_json::from_str::<Dataset>(r#"{"a": "x"}"#).is_err());
    }
}
