//! CSV export.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use bdsa_model::{CanonicalField, Dataset};

/// Standardized fields the dataset carries, in fixed order, then every other
/// column in its original relative order.
pub fn export_columns(dataset: &Dataset) -> Vec<String> {
    let mut columns: Vec<String> = CanonicalField::STANDARDIZED_ORDER
        .iter()
        .map(|field| field.standardized())
        .filter(|name| dataset.has_column(name))
        .map(str::to_string)
        .collect();
    columns.extend(
        dataset
            .columns()
            .iter()
            .filter(|name| !CanonicalField::is_standardized_name(name))
            .cloned(),
    );
    columns
}

/// Write the dataset as CSV with a header row. Missing values are written
/// as empty cells.
pub fn write_csv<W: Write>(dataset: &Dataset, writer: W) -> Result<()> {
    let columns = export_columns(dataset);
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(&columns).context("write csv header")?;
    for (index, row) in dataset.rows().iter().enumerate() {
        csv.write_record(columns.iter().map(|column| row.value(column)))
            .with_context(|| format!("write csv record {}", index + 1))?;
    }
    csv.flush().context("flush csv")?;
    Ok(())
}

pub fn write_csv_file(dataset: &Dataset, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("create {}", path.display()))?;
    write_csv(dataset, std::io::BufWriter::new(file))
        .with_context(|| format!("export {}", path.display()))?;
    info!(path = %path.display(), rows = dataset.len(), "exported csv");
    Ok(())
}
