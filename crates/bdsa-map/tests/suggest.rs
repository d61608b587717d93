use bdsa_map::{Suggester, suggest_mapping};
use bdsa_model::CanonicalField;

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[test]
fn exact_aliases_are_suggested() {
    let result = Suggester::default().suggest(&columns(&["Stain", "region_name", "case_id"]));

    let stain = result.suggestion(CanonicalField::StainId).unwrap();
    assert_eq!(stain.source_column, "Stain");
    assert!(stain.exact);
    assert_eq!(stain.confidence, 1.0);
    assert_eq!(
        result.suggestion(CanonicalField::RegionName).unwrap().source_column,
        "region_name"
    );
    assert!(result.unmapped_fields.is_empty());

    let fields: Vec<CanonicalField> = result.suggestions.iter().map(|s| s.field).collect();
    assert_eq!(fields, CanonicalField::STANDARDIZED_ORDER);
}

#[test]
fn misspelled_column_is_matched_fuzzily() {
    let result = Suggester::default().suggest(&columns(&["regon_name", "Notes"]));

    let region = result.suggestion(CanonicalField::RegionName).unwrap();
    assert_eq!(region.source_column, "regon_name");
    assert!(!region.exact);
    assert!(region.confidence >= 0.85 && region.confidence < 1.0);
}

#[test]
fn unrelated_columns_are_left_out() {
    let result = Suggester::default().suggest(&columns(&["Block", "Notes"]));

    assert!(result.suggestions.is_empty());
    assert_eq!(result.unmapped_fields, CanonicalField::STANDARDIZED_ORDER);
    assert!(result.to_mapping().is_empty());
}

#[test]
fn each_column_backs_one_field() {
    let result = suggest_mapping(&columns(&["stain", "Stain"]), 0.85);

    assert_eq!(result.suggestions.len(), 1);
    assert_eq!(result.suggestions[0].source_column, "stain");
    let mapping = result.to_mapping();
    assert_eq!(mapping.get(CanonicalField::StainId), Some("stain"));
    assert!(!mapping.is_mapped(CanonicalField::CaseId));
}

#[test]
fn standardized_columns_are_never_sources() {
    let result = Suggester::default().suggest(&columns(&["bdsaStainID", "bdsaCaseID"]));
    assert!(result.suggestions.is_empty());
}

#[test]
fn nan_threshold_behaves_like_the_default() {
    let names = columns(&["Stain", "regon_name"]);
    let fallback = Suggester::new(f32::NAN).suggest(&names);
    let default = Suggester::default().suggest(&names);
    assert_eq!(fallback.to_mapping(), default.to_mapping());
    assert!(!fallback.suggestions.is_empty());
}
