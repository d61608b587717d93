use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use indexmap::IndexMap;

use bdsa_cli::pipeline::FilesetSummary;
use bdsa_map::{FieldBinding, SuggestionResult};
use bdsa_model::{CanonicalField, FieldOutcome, HistogramMode, ValidationReport};
use bdsa_transform::FieldRewrites;

pub fn print_bindings(bindings: &[(CanonicalField, FieldBinding)]) {
    println!("{}", bindings_table(bindings));
}

pub fn print_rewrites(rewrites: &IndexMap<String, FieldRewrites>) {
    if rewrites.is_empty() {
        println!("Shim dictionary: no dictionary field present in the dataset.");
        return;
    }
    println!("{}", rewrites_table(rewrites));
}

pub fn print_fileset(fileset: &FilesetSummary) {
    match fileset.column {
        Some(column) => println!(
            "Local files: {} on disk, {} rows dropped (matched on '{column}')",
            fileset.local_files, fileset.dropped
        ),
        None => println!("Local files: dataset has no filename column; no rows dropped"),
    }
}

pub fn print_report(report: &ValidationReport) {
    println!("{}", report_table(report));
    for (field, histogram) in &report.histograms {
        if histogram.counts.is_empty() {
            continue;
        }
        println!("{}", histogram_table(*field, histogram.mode, &histogram.counts.most_common()));
    }
}

pub fn print_suggestions(result: &SuggestionResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Column"),
        header_cell("Confidence"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for field in CanonicalField::STANDARDIZED_ORDER {
        match result.suggestion(field) {
            Some(suggestion) => {
                let confidence = format!("{:.2}", suggestion.confidence);
                let confidence = if suggestion.exact {
                    Cell::new(confidence).fg(Color::Green)
                } else {
                    Cell::new(confidence).fg(Color::Yellow)
                };
                table.add_row(vec![
                    Cell::new(field.as_str()),
                    Cell::new(&suggestion.source_column),
                    confidence,
                ]);
            }
            None => {
                table.add_row(vec![Cell::new(field.as_str()), dim_cell("-"), dim_cell("-")]);
            }
        }
    }
    println!("{table}");
}

fn bindings_table(bindings: &[(CanonicalField, FieldBinding)]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Standardized"),
        header_cell("Source column"),
    ]);
    apply_table_style(&mut table);
    for (field, binding) in bindings {
        let source = match binding {
            FieldBinding::Mapped(column) => Cell::new(column),
            FieldBinding::Unmapped => dim_cell("not mapped"),
            FieldBinding::Dangling(column) => {
                Cell::new(format!("{column} (missing)")).fg(Color::Yellow)
            }
        };
        table.add_row(vec![
            Cell::new(field.as_str()),
            Cell::new(field.standardized()),
            source,
        ]);
    }
    table
}

fn rewrites_table(rewrites: &IndexMap<String, FieldRewrites>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Rewritten"),
        header_cell("Canonical"),
        header_cell("Unmatched"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (field, counts) in rewrites {
        table.add_row(vec![
            Cell::new(field),
            Cell::new(counts.rewritten),
            Cell::new(counts.canonical),
            count_cell(counts.unmatched, Color::Yellow),
        ]);
    }
    table
}

fn report_table(report: &ValidationReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Validated"),
        header_cell("Column"),
    ]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new("Files").add_attribute(Attribute::Bold),
        Cell::new(&report.files.percentage_text).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    for (field, outcome) in &report.fields {
        let row = match outcome {
            FieldOutcome::Resolved(stats) => vec![
                Cell::new(field.as_str()),
                Cell::new(&stats.percentage_text),
                Cell::new(&stats.column),
            ],
            FieldOutcome::NotFound => vec![
                Cell::new(field.as_str()),
                Cell::new(outcome.display_text()).fg(Color::Red),
                dim_cell("-"),
            ],
        };
        table.add_row(row);
    }
    table
}

fn histogram_table(field: CanonicalField, mode: HistogramMode, entries: &[(&str, usize)]) -> Table {
    let label = match field {
        CanonicalField::StainId => "Stain",
        CanonicalField::RegionName => "Region",
        CanonicalField::CaseId => "Case",
    };
    let scope = match mode {
        HistogramMode::Valid => "valid",
        HistogramMode::Invalid => "invalid",
    };
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(&format!("{label} ({scope})")),
        header_cell("Count"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (value, count) in entries {
        let value = if value.is_empty() {
            dim_cell("(empty)")
        } else {
            Cell::new(value)
        };
        table.add_row(vec![value, Cell::new(count)]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
