use bdsa_model::{CanonicalField, Dataset, ModelError, Row, resolve_column};
use proptest::prelude::*;

#[test]
fn standardized_names_are_fixed() {
    let names: Vec<&str> = CanonicalField::STANDARDIZED_ORDER
        .iter()
        .map(|field| field.standardized())
        .collect();
    assert_eq!(names, vec!["bdsaCaseID", "bdsaRegionID", "bdsaStainID"]);
    assert!(CanonicalField::is_standardized_name("bdsaRegionID"));
    assert!(!CanonicalField::is_standardized_name("regionName"));
}

#[test]
fn canonical_field_parses_schema_names() {
    for field in CanonicalField::STANDARDIZED_ORDER {
        let parsed: CanonicalField = field.as_str().parse().unwrap();
        assert_eq!(parsed, field);
    }
    assert!(matches!(
        "StainID".parse::<CanonicalField>(),
        Err(ModelError::UnknownField(name)) if name == "StainID"
    ));
}

#[test]
fn governed_fields_exclude_case() {
    assert!(CanonicalField::StainId.is_governed());
    assert!(CanonicalField::RegionName.is_governed());
    assert!(!CanonicalField::CaseId.is_governed());
}

#[test]
fn dataset_serializes_back_to_records() {
    let dataset = Dataset::from_rows(vec![Row::from_iter([("stainID", "he"), ("x", "")])]);
    let json = serde_json::to_value(&dataset).unwrap();
    assert_eq!(json, serde_json::json!([{"stainID": "he", "x": ""}]));
}

proptest! {
    #[test]
    fn resolve_column_returns_first_listed_present_candidate(
        present in proptest::collection::vec(any::<bool>(), 4)
    ) {
        let aliases = CanonicalField::StainId.aliases();
        let available: Vec<&str> = aliases
            .iter()
            .zip(&present)
            .filter(|(_, keep)| **keep)
            .map(|(name, _)| *name)
            .rev()
            .collect();
        let expected = aliases
            .iter()
            .zip(&present)
            .find(|(_, keep)| **keep)
            .map(|(name, _)| *name);
        prop_assert_eq!(resolve_column(aliases.iter().copied(), &available), expected);
    }
}
