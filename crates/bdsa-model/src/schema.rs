//! The JSON-Schema subset the validator consumes.
//!
//! Only `properties.<field>.enum` is read. A property whose `enum` is absent
//! or not a list has no valid values.

use indexmap::IndexMap;

use crate::error::{ModelError, Result};

/// Enumeration declared for one schema property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyEnum {
    /// String members of the declared `enum` list, in declaration order.
    Values(Vec<String>),
    /// `enum` absent or not a list.
    Unavailable,
}

impl PropertyEnum {
    pub fn contains(&self, value: &str) -> bool {
        match self {
            Self::Values(values) => values.iter().any(|v| v == value),
            Self::Unavailable => false,
        }
    }

    pub fn values(&self) -> &[String] {
        match self {
            Self::Values(values) => values,
            Self::Unavailable => &[],
        }
    }
}

static UNAVAILABLE: PropertyEnum = PropertyEnum::Unavailable;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDocument {
    properties: IndexMap<String, PropertyEnum>,
}

impl SchemaDocument {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        let root = value.as_object().ok_or(ModelError::SchemaNotObject)?;
        let properties = root
            .get("properties")
            .and_then(serde_json::Value::as_object)
            .ok_or(ModelError::SchemaMissingProperties)?;
        let properties = properties
            .iter()
            .map(|(name, property)| (name.clone(), read_enum(property)))
            .collect();
        Ok(Self { properties })
    }

    /// Builder used by callers that assemble a schema in code.
    pub fn with_enum<I, S>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties.insert(
            field.into(),
            PropertyEnum::Values(values.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Enumeration for `field`; a field the schema does not declare is
    /// [`PropertyEnum::Unavailable`].
    pub fn property_enum(&self, field: &str) -> &PropertyEnum {
        self.properties
            .get(field)
            .unwrap_or(&UNAVAILABLE)
    }

    pub fn allows(&self, field: &str, value: &str) -> bool {
        self.property_enum(field).contains(value)
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }
}

fn read_enum(property: &serde_json::Value) -> PropertyEnum {
    match property.get("enum") {
        Some(serde_json::Value::Array(items)) => PropertyEnum::Values(
            items
                .iter()
                .filter_map(serde_json::Value::as_str)
                .map(str::to_string)
                .collect(),
        ),
        _ => PropertyEnum::Unavailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_enums_and_tolerates_malformed_ones() {
        let schema = SchemaDocument::from_json_str(
            r#"{"properties": {
                "stainID": {"enum": ["H&E", "Tau"]},
                "regionName": {"enum": "Amygdala"},
                "caseID": {"type": "string"}
            }}"#,
        )
        .unwrap();
        assert!(schema.allows("stainID", "Tau"));
        assert!(!schema.allows("stainID", "tau"));
        assert_eq!(schema.property_enum("regionName"), &PropertyEnum::Unavailable);
        assert_eq!(schema.property_enum("caseID"), &PropertyEnum::Unavailable);
        assert_eq!(schema.property_enum("missing"), &PropertyEnum::Unavailable);
    }

    #[test]
    fn root_and_properties_must_be_objects() {
        assert!(matches!(
            SchemaDocument::from_json_str("[]"),
            Err(ModelError::SchemaNotObject)
        ));
        assert!(matches!(
            SchemaDocument::from_json_str(r#"{"title": "x"}"#),
            Err(ModelError::SchemaMissingProperties)
        ));
    }
}
