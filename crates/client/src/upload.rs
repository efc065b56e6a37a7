use std::path::Path;

use crate::error::ClientError;

/// Extensions the backend accepts for dataset uploads.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["xlsx", "xls", "csv"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Xlsx,
    Xls,
    Csv,
}

impl DatasetKind {
    pub fn mime(self) -> &'static str {
        match self {
            DatasetKind::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            DatasetKind::Xls => "application/vnd.ms-excel",
            DatasetKind::Csv => "text/csv",
        }
    }
}

/// Accept filter applied before anything is sent.
pub fn dataset_kind(path: &Path) -> Result<DatasetKind, ClientError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match extension.as_str() {
        "xlsx" => Ok(DatasetKind::Xlsx),
        "xls" => Ok(DatasetKind::Xls),
        "csv" => Ok(DatasetKind::Csv),
        _ => Err(ClientError::UnsupportedFile(
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        )),
    }
}
