pub mod csv_export;
pub mod table;

pub use csv_export::{export_csv, to_csv_string, write_csv, ExportError, DEFAULT_CSV_FILE};
pub use table::{capitalize_header, TableView, HIDDEN_COLUMN};
