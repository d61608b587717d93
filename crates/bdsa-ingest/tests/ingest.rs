use std::fs;
use std::path::{Path, PathBuf};

use bdsa_ingest::{
    CsvOptions, IngestError, list_files, load_mapping, load_schema, load_shim_dictionary,
    read_csv, read_dataset,
};
use bdsa_model::CanonicalField;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn reads_csv_with_bom_and_short_records() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(
        dir.path(),
        "meta.csv",
        "\u{feff} caseID ,stainID,region\nA1, he ,Amygdala\nA2,Tau\n,,\n",
    );

    let dataset = read_csv(&path, CsvOptions::default()).expect("read csv");

    assert_eq!(dataset.columns(), ["caseID", "stainID", "region"]);
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.rows()[0].get("stainID"), Some(" he "));
    assert_eq!(dataset.rows()[1].get("region"), Some(""));
    assert_eq!(dataset.rows()[2].get("caseID"), Some(""));
}

#[test]
fn delimiter_only_records_count_as_rows() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(dir.path(), "meta.csv", "caseID,stainID\nA1,H&E\n,\n\n");

    let dataset = read_csv(&path, CsvOptions::default()).expect("read csv");

    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.rows()[1].get("caseID"), Some(""));
    assert_eq!(dataset.rows()[1].get("stainID"), Some(""));
}

#[test]
fn normalizes_headers_when_asked() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(dir.path(), "meta.csv", "File Name,Stain ID\na.svs,he\n");
    let options = CsvOptions {
        normalize_headers: true,
    };
    let dataset = read_dataset(&path, options).expect("read csv");
    assert_eq!(dataset.columns(), ["fileName", "stain_id"]);
}

#[test]
fn duplicate_headers_are_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(dir.path(), "meta.csv", "stain,stain\nhe,tau\n");
    let err = read_csv(&path, CsvOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::DuplicateColumn { column, .. } if column == "stain"));
}

#[test]
fn reads_json_records() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(
        dir.path(),
        "meta.json",
        r#"[{"caseID": "A1", "blockID": 3}, {"caseID": null, "stainID": "he"}]"#,
    );
    let dataset = read_dataset(&path, CsvOptions::default()).expect("read json");
    assert_eq!(dataset.columns(), ["caseID", "blockID", "stainID"]);
    assert_eq!(dataset.rows()[0].get("blockID"), Some("3"));
    assert_eq!(dataset.rows()[1].get("caseID"), Some(""));
}

#[test]
fn nested_json_values_are_not_tabular() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(dir.path(), "meta.json", r#"[{"caseID": {"id": 1}}]"#);
    assert!(matches!(
        read_dataset(&path, CsvOptions::default()),
        Err(IngestError::Json { .. })
    ));
}

#[test]
fn missing_schema_is_unavailable() {
    let dir = TempDir::new().expect("temp dir");
    let err = load_schema(&dir.path().join("schema.json")).unwrap_err();
    assert!(matches!(err, IngestError::SchemaUnavailable { .. }));
    assert!(err.is_unavailable());
}

#[test]
fn malformed_schema_is_not_unavailable() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(dir.path(), "schema.json", r#"{"title": "no properties"}"#);
    let err = load_schema(&path).unwrap_err();
    assert!(matches!(err, IngestError::Model { .. }));
    assert!(!err.is_unavailable());
}

#[test]
fn dictionary_load_distinguishes_missing_from_malformed() {
    let dir = TempDir::new().expect("temp dir");
    let missing = load_shim_dictionary(&dir.path().join("shim.json")).unwrap_err();
    assert!(missing.is_unavailable());

    let path = write(dir.path(), "shim.json", r#"{"stainID": ["he"]}"#);
    let malformed = load_shim_dictionary(&path).unwrap_err();
    assert!(!malformed.is_unavailable());

    let path = write(dir.path(), "shim.json", r#"{"stainID": {"H&E": ["he"]}}"#);
    let dictionary = load_shim_dictionary(&path).expect("load dictionary");
    assert_eq!(
        dictionary.field("stainID").unwrap().canonical_for("he"),
        Some("H&E")
    );
}

#[test]
fn loads_column_mapping() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(dir.path(), "mapping.json", r#"{"caseID": "Case_Num"}"#);
    let mapping = load_mapping(&path).expect("load mapping");
    assert_eq!(mapping.get(CanonicalField::CaseId), Some("Case_Num"));
}

#[test]
fn lists_visible_files_sorted() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "b.svs", "");
    write(dir.path(), "a.svs", "");
    write(dir.path(), ".hidden", "");
    fs::create_dir(dir.path().join("nested")).expect("create dir");

    assert_eq!(list_files(dir.path()).expect("list"), vec!["a.svs", "b.svs"]);
    assert!(matches!(
        list_files(&dir.path().join("missing")),
        Err(IngestError::DirectoryNotFound { .. })
    ));
}
