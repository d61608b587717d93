use indexmap::IndexMap;
use tracing::{debug, warn};

use bdsa_model::{
    CanonicalField, ColumnMapping, Dataset, FieldOutcome, FieldStats, FileValidity, Histogram,
    SchemaDocument, ValidationReport, ValueCounts, format_percentage, resolve_column,
};

use crate::options::ValidationOptions;

/// Report field order.
const REPORT_ORDER: [CanonicalField; 3] = [
    CanonicalField::CaseId,
    CanonicalField::StainId,
    CanonicalField::RegionName,
];

/// Column whose values stand for `field`.
///
/// Resolution order: the standardized field when at least one row has a
/// value for it, then the mapped column if the dataset has it, then the
/// field's alias list.
pub fn effective_column(
    dataset: &Dataset,
    field: CanonicalField,
    mapping: Option<&ColumnMapping>,
) -> Option<String> {
    let standardized = field.standardized();
    if dataset.has_values(standardized) {
        return Some(standardized.to_string());
    }
    if let Some(column) = mapping.and_then(|m| m.get(field))
        && dataset.has_column(column)
    {
        return Some(column.to_string());
    }
    resolve_column(field.aliases().iter().copied(), dataset.columns()).map(str::to_string)
}

pub fn validate(dataset: &Dataset, schema: &SchemaDocument) -> ValidationReport {
    validate_with(dataset, schema, &ValidationOptions::default())
}

pub fn validate_with(
    dataset: &Dataset,
    schema: &SchemaDocument,
    options: &ValidationOptions,
) -> ValidationReport {
    let total = dataset.len();
    let mut columns: IndexMap<CanonicalField, Option<String>> = IndexMap::new();
    let mut fields = IndexMap::new();
    let mut histograms = IndexMap::new();

    for field in REPORT_ORDER {
        let column = effective_column(dataset, field, options.mapping.as_ref());
        let Some(name) = column.as_deref() else {
            warn!(field = %field, candidates = ?field.aliases(), "column not found or not mapped");
            fields.insert(field, FieldOutcome::NotFound);
            columns.insert(field, None);
            continue;
        };
        debug!(field = %field, column = name, "resolved column");

        let is_valid = |value: &str| classify(schema, field, value);
        let valid_count = dataset.column_values(name).filter(|v| is_valid(*v)).count();
        fields.insert(
            field,
            FieldOutcome::Resolved(FieldStats::new(name, valid_count, total)),
        );

        if let Some(mode) = options.histogram_mode(field) {
            let counts: ValueCounts = dataset
                .column_values(name)
                .filter(|v| mode.admits(is_valid(*v)))
                .collect();
            histograms.insert(field, Histogram { mode, counts });
        }
        columns.insert(field, column);
    }

    let files = file_validity(dataset, schema, &columns);
    ValidationReport {
        total_rows: total,
        files,
        fields,
        histograms,
    }
}

/// caseID is valid when present; governed fields must be schema enum members.
fn classify(schema: &SchemaDocument, field: CanonicalField, value: &str) -> bool {
    if field.is_governed() {
        schema.allows(field.as_str(), value)
    } else {
        !value.is_empty()
    }
}

fn file_validity(
    dataset: &Dataset,
    schema: &SchemaDocument,
    columns: &IndexMap<CanonicalField, Option<String>>,
) -> FileValidity {
    let total = dataset.len();
    let resolved: Option<Vec<(CanonicalField, &str)>> = REPORT_ORDER
        .iter()
        .map(|field| {
            columns
                .get(field)
                .and_then(Option::as_deref)
                .map(|column| (*field, column))
        })
        .collect();

    let valid_count = match resolved {
        Some(resolved) => dataset
            .rows()
            .iter()
            .filter(|row| {
                resolved
                    .iter()
                    .all(|(field, column)| classify(schema, *field, row.value(column)))
            })
            .count(),
        None => {
            debug!("composite file validity needs all three columns; counting zero");
            0
        }
    };

    FileValidity {
        valid_count,
        percentage_text: format_percentage(valid_count, total),
    }
}
