use crate::error::StorageError;
use crate::models::MergedTable;
use csv::WriterBuilder;
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Save the raw API payload as a pretty JSON array (2-space indent, Unicode unescaped).
pub fn save_raw_json<P: AsRef<Path>>(countries: &[Value], path: P) -> Result<(), StorageError> {
    let mut f = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut f, countries)?;
    f.write_all(b"\n")?;
    f.flush()?;
    Ok(())
}

/// Save the merged table as CSV with a header row and no index column.
///
/// Null cells are written empty. Text cells that a spreadsheet would treat as a formula
/// are prefixed with a single quote.
pub fn save_merged_csv<P: AsRef<Path>>(table: &MergedTable, path: P) -> Result<(), StorageError> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record(table.header())?;
    for row in &table.rows {
        wtr.write_record(
            row.cells()
                .into_iter()
                .map(|c| c.map(|s| neutralize_formula(&s)).unwrap_or_default()),
        )?;
    }
    wtr.flush()?;
    Ok(())
}

fn neutralize_formula(cell: &str) -> String {
    let numeric = cell.parse::<f64>().is_ok();
    if !numeric && cell.starts_with(['=', '+', '-', '@']) {
        format!("'{cell}")
    } else {
        cell.to_string()
    }
}
