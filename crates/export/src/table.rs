use schema::Row;
use serde_json::{Number, Value};

/// Column present in backend records but never shown.
pub const HIDDEN_COLUMN: &str = "id";

/// Uppercase the first character of each space-separated word.
pub fn capitalize_header(header: &str) -> String {
    header
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Number text as a browser prints it: whole floats lose the `.0`, and
/// magnitudes from 1e21 up keep exponent form.
fn number_text(n: &Number) -> String {
    let text = n.to_string();
    let Some(v) = n.as_f64().filter(|_| n.is_f64()) else {
        return text;
    };

    if v == 0.0 {
        "0".to_string()
    } else if v.fract() == 0.0 && v.abs() < 1e21 {
        format!("{}", v)
    } else {
        match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with(['+', '-']) => {
                format!("{}e+{}", mantissa, exp)
            }
            _ => text,
        }
    }
}

/// Detail table as displayed: the first row's columns, minus `id`.
#[derive(Debug, Clone, Copy)]
pub struct TableView<'a> {
    rows: &'a [Row],
}

impl<'a> TableView<'a> {
    pub fn new(rows: &'a [Row]) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &'a [Row] {
        self.rows
    }

    /// Raw column keys, in the order of the first row.
    pub fn columns(&self) -> Vec<&'a str> {
        self.rows
            .first()
            .map(|row| {
                row.keys()
                    .map(String::as_str)
                    .filter(|k| *k != HIDDEN_COLUMN)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns().into_iter().map(capitalize_header).collect()
    }

    /// Cell text, `None` for missing or null values.
    pub fn cell(row: &Row, column: &str) -> Option<String> {
        match row.get(column)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(number_text(n)),
            other => Some(other.to_string()),
        }
    }

    /// Cell text as shown on screen, `-` standing in for missing values.
    pub fn display_cell(row: &Row, column: &str) -> String {
        Self::cell(row, column).unwrap_or_else(|| "-".to_string())
    }

    /// Displayed cell text, row by row.
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        let columns = self.columns();
        self.rows
            .iter()
            .map(|row| columns.iter().map(|c| Self::display_cell(row, c)).collect())
            .collect()
    }
}
