use bdsa_map::{FieldBinding, map_columns, map_columns_with_outcome};
use bdsa_model::{CanonicalField, ColumnMapping, Dataset, Row};
use proptest::prelude::*;

fn case_rows() -> Dataset {
    Dataset::from_rows(vec![
        Row::from_iter([("Case_Num", "A1"), ("Stain Name", "he")]),
        Row::from_iter([("Case_Num", "A2"), ("Stain Name", "Tau")]),
    ])
}

#[test]
fn mapped_case_column_fills_standardized_field() {
    let mapping = ColumnMapping::new().with(CanonicalField::CaseId, "Case_Num");
    let harmonized = map_columns(&case_rows(), &mapping);

    let cases: Vec<&str> = harmonized.column_values("bdsaCaseID").collect();
    assert_eq!(cases, vec!["A1", "A2"]);
    let regions: Vec<&str> = harmonized.column_values("bdsaRegionID").collect();
    assert_eq!(regions, vec!["", ""]);
    assert_eq!(harmonized.rows()[1].get("bdsaStainID"), Some(""));
}

#[test]
fn output_order_puts_standardized_fields_first() {
    let dataset = Dataset::from_rows(vec![Row::from_iter([
        ("fileName", "slide1.svs"),
        ("bdsaStainID", "stale"),
        ("Case_Num", "A1"),
    ])]);
    let mapping = ColumnMapping::new().with(CanonicalField::CaseId, "Case_Num");
    let harmonized = map_columns(&dataset, &mapping);

    assert_eq!(
        harmonized.columns(),
        ["bdsaCaseID", "bdsaRegionID", "bdsaStainID", "fileName", "Case_Num"]
    );
    let row = &harmonized.rows()[0];
    let order: Vec<&str> = row.field_names().collect();
    assert_eq!(order, harmonized.columns());
    // An input column with a standardized name is replaced by the mapper.
    assert_eq!(row.get("bdsaStainID"), Some(""));
}

#[test]
fn rows_missing_fields_are_empty_filled() {
    let dataset = Dataset::from_rows(vec![
        Row::from_iter([("stain", "he")]),
        Row::from_iter([("notes", "re-cut")]),
    ]);
    let mapping = ColumnMapping::new().with(CanonicalField::StainId, "stain");
    let harmonized = map_columns(&dataset, &mapping);

    assert_eq!(harmonized.rows()[0].get("notes"), Some(""));
    assert_eq!(harmonized.rows()[1].get("stain"), Some(""));
    assert_eq!(harmonized.rows()[1].get("bdsaStainID"), Some(""));
}

#[test]
fn input_and_mapping_are_untouched() {
    let dataset = case_rows();
    let before = dataset.clone();
    let mapping = ColumnMapping::new().with(CanonicalField::StainId, "Stain Name");
    let mapping_before = mapping.clone();

    let mapped = map_columns_with_outcome(&dataset, &mapping);

    assert_eq!(dataset, before);
    assert_eq!(mapping, mapping_before);
    assert_eq!(
        mapped.binding(CanonicalField::StainId),
        &FieldBinding::Mapped("Stain Name".to_string())
    );
}

#[test]
fn empty_dataset_maps_to_empty_dataset() {
    let harmonized = map_columns(&Dataset::new(), &ColumnMapping::new());
    assert!(harmonized.is_empty());
    assert_eq!(harmonized.columns(), ["bdsaCaseID", "bdsaRegionID", "bdsaStainID"]);
}

proptest! {
    #[test]
    fn standardized_values_copy_source_verbatim(
        values in proptest::collection::vec(".{0,12}", 0..20)
    ) {
        let rows: Vec<Row> = values
            .iter()
            .enumerate()
            .map(|(i, v)| Row::from_iter([("Region Label", v.clone()), ("idx", i.to_string())]))
            .collect();
        let dataset = Dataset::from_rows(rows);
        let mapping = ColumnMapping::new().with(CanonicalField::RegionName, "Region Label");

        let harmonized = map_columns(&dataset, &mapping);

        prop_assert_eq!(harmonized.len(), dataset.len());
        for (input, output) in dataset.rows().iter().zip(harmonized.rows()) {
            prop_assert_eq!(output.get("bdsaRegionID"), input.get("Region Label"));
            prop_assert_eq!(output.get("idx"), input.get("idx"));
        }
    }
}
