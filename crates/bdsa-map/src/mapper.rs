//! Column mapper implementation.

use tracing::{debug, warn};

use bdsa_model::{CanonicalField, ColumnMapping, Dataset, Row};

/// How a canonical field was bound while mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldBinding {
    /// Values were copied from this existing column.
    Mapped(String),
    /// No mapping entry.
    Unmapped,
    /// The mapping names a column the dataset does not have.
    Dangling(String),
}

impl FieldBinding {
    pub fn source_column(&self) -> Option<&str> {
        match self {
            Self::Mapped(column) => Some(column),
            Self::Unmapped | Self::Dangling(_) => None,
        }
    }
}

static UNMAPPED: FieldBinding = FieldBinding::Unmapped;

/// Harmonized dataset plus the binding chosen for each canonical field, in
/// standardized order.
#[derive(Debug, Clone)]
pub struct MappedDataset {
    pub dataset: Dataset,
    pub bindings: Vec<(CanonicalField, FieldBinding)>,
}

impl MappedDataset {
    pub fn binding(&self, field: CanonicalField) -> &FieldBinding {
        self.bindings
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, binding)| binding)
            .unwrap_or(&UNMAPPED)
    }
}

/// Output column order: the standardized fields, then every input column in
/// its original order with standardized names removed.
pub fn output_columns(columns: &[String]) -> Vec<String> {
    let mut ordered: Vec<String> = CanonicalField::STANDARDIZED_ORDER
        .iter()
        .map(|field| field.standardized().to_string())
        .collect();
    for column in columns {
        if !CanonicalField::is_standardized_name(column) && !ordered.contains(column) {
            ordered.push(column.clone());
        }
    }
    ordered
}

pub fn map_columns(dataset: &Dataset, mapping: &ColumnMapping) -> Dataset {
    map_columns_with_outcome(dataset, mapping).dataset
}

/// Copy mapped source columns verbatim into the standardized fields.
///
/// Unmapped and dangling fields become empty strings. Every output row
/// carries every output column; row order is preserved.
pub fn map_columns_with_outcome(dataset: &Dataset, mapping: &ColumnMapping) -> MappedDataset {
    let bindings: Vec<(CanonicalField, FieldBinding)> = CanonicalField::STANDARDIZED_ORDER
        .iter()
        .map(|&field| (field, bind(dataset, mapping, field)))
        .collect();

    let columns = output_columns(dataset.columns());
    let passthrough = &columns[CanonicalField::STANDARDIZED_ORDER.len()..];

    let rows: Vec<Row> = dataset
        .rows()
        .iter()
        .map(|row| {
            let mut out = Row::with_capacity(columns.len());
            for (field, binding) in &bindings {
                let value = binding
                    .source_column()
                    .map(|column| row.value(column))
                    .unwrap_or("");
                out.insert(field.standardized(), value);
            }
            for column in passthrough {
                out.insert(column.as_str(), row.value(column));
            }
            out
        })
        .collect();

    MappedDataset {
        dataset: Dataset::with_columns(columns, rows),
        bindings,
    }
}

fn bind(dataset: &Dataset, mapping: &ColumnMapping, field: CanonicalField) -> FieldBinding {
    match mapping.get(field) {
        None => {
            debug!(field = %field, "canonical field unmapped");
            FieldBinding::Unmapped
        }
        Some(column) if dataset.has_column(column) => {
            debug!(field = %field, column, "canonical field mapped");
            FieldBinding::Mapped(column.to_string())
        }
        Some(column) => {
            warn!(
                field = %field,
                column,
                "mapped column not present in dataset; standardized field left empty"
            );
            FieldBinding::Dangling(column.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standardized_columns_come_first_without_duplicates() {
        let columns = vec![
            "fileName".to_string(),
            "bdsaStainID".to_string(),
            "Case_Num".to_string(),
        ];
        assert_eq!(
            output_columns(&columns),
            vec!["bdsaCaseID", "bdsaRegionID", "bdsaStainID", "fileName", "Case_Num"]
        );
    }

    #[test]
    fn dangling_mapping_is_reported() {
        let dataset = Dataset::from_rows(vec![Row::from_iter([("a", "1")])]);
        let mapping = ColumnMapping::new().with(CanonicalField::StainId, "missing");
        let mapped = map_columns_with_outcome(&dataset, &mapping);
        assert_eq!(
            mapped.binding(CanonicalField::StainId),
            &FieldBinding::Dangling("missing".to_string())
        );
        assert_eq!(mapped.binding(CanonicalField::CaseId), &FieldBinding::Unmapped);
        assert_eq!(mapped.dataset.rows()[0].get("bdsaStainID"), Some(""));
    }
}
