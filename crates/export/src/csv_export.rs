use csv::{QuoteStyle, Terminator, WriterBuilder};
use schema::Row;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::table::TableView;

pub const DEFAULT_CSV_FILE: &str = "real_estate_data_details.csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("there is no table to export")]
    Empty,
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv output was not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Write the displayed table: capitalized headers, every field quoted,
/// embedded quotes doubled, missing values as empty fields.
pub fn write_csv<W: Write>(rows: &[Row], writer: W) -> Result<(), ExportError> {
    let table = TableView::new(rows);
    let columns = table.columns();
    if columns.is_empty() {
        return Ok(());
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .double_quote(true)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    writer.write_record(table.headers())?;
    for row in table.rows() {
        writer.write_record(
            columns
                .iter()
                .map(|c| TableView::cell(row, c).unwrap_or_default()),
        )?;
    }
    writer.flush()?;
    Ok(())
}

pub fn to_csv_string(rows: &[Row]) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(rows, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Save the table to `path`. A table with no rows or no visible columns is
/// an error so no blank file is left behind.
pub fn export_csv(rows: &[Row], path: &Path) -> Result<(), ExportError> {
    if TableView::new(rows).columns().is_empty() {
        return Err(ExportError::Empty);
    }
    let file = File::create(path)?;
    write_csv(rows, file)?;
    info!(path = %path.display(), rows = rows.len(), "exported table");
    Ok(())
}
