use bdsa_model::{Dataset, Row};
use bdsa_transform::{FilesetFilter, file_name_column, retain_local_files};

#[test]
fn keeps_only_rows_for_local_files() {
    let dataset = Dataset::from_rows(vec![
        Row::from_iter([("file_name", "a.svs"), ("stainID", "he")]),
        Row::from_iter([("file_name", "b.svs"), ("stainID", "tau")]),
        Row::from_iter([("file_name", "c.svs"), ("stainID", "he")]),
    ]);

    let filtered = retain_local_files(&dataset, &["c.svs", "a.svs", "z.svs"]);

    let FilesetFilter::Filtered {
        dataset: kept,
        column,
        dropped,
    } = filtered
    else {
        panic!("expected a filtered dataset");
    };
    assert_eq!(column, "file_name");
    assert_eq!(dropped, 1);
    let names: Vec<&str> = kept.column_values("file_name").collect();
    assert_eq!(names, vec!["a.svs", "c.svs"]);
    assert_eq!(kept.columns(), dataset.columns());
}

#[test]
fn filename_alias_priority_follows_list_order() {
    let dataset = Dataset::from_rows(vec![Row::from_iter([
        ("file name", "x.svs"),
        ("FileName", "y.svs"),
    ])]);
    assert_eq!(file_name_column(&dataset), Some("FileName"));
}

#[test]
fn missing_filename_column_passes_rows_through() {
    let dataset = Dataset::from_rows(vec![Row::from_iter([("stainID", "he")])]);
    let filtered = retain_local_files(&dataset, &["a.svs"]);
    assert!(matches!(filtered, FilesetFilter::NoFileColumn(_)));
    assert_eq!(filtered.into_dataset(), dataset);
}
