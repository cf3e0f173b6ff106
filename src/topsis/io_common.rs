use std::path::Path;

use topsis_ranking::{CellValue, RawTable};

/// A table as read from a file.
///
/// Next to the typed cells, the original text of each cell is kept so that the output reproduces the
/// input columns exactly.
#[derive(PartialEq, Debug, Clone)]
pub struct InputTable {
    pub raw: RawTable,
    pub source_text: Vec<Vec<String>>,
    /// The delimiter to use when writing the output.
    pub delimiter: u8,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputFormat {
    Delimited,
    Spreadsheet,
}

pub fn input_format(path: &str) -> InputFormat {
    let extension = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match extension.as_deref() {
        Some("xlsx") | Some("xlsm") | Some("xls") | Some("ods") => InputFormat::Spreadsheet,
        _ => InputFormat::Delimited,
    }
}

/// Types the cells of a table read as text.
///
/// The column of names is typed as a whole: it is numeric only when every non-empty cell in it
/// parses as a number, otherwise all its non-empty cells are text, even those that look like
/// numbers. The criterion columns must be numeric throughout, so their cells are typed one by one
/// and a type error points at the offending cell. Empty cells are missing.
pub fn typed_rows(text: &[Vec<String>]) -> Vec<Vec<CellValue>> {
    let names_are_numeric = column_is_numeric(text, 0);
    text.iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(col, s)| typed_cell(s, col > 0 || names_are_numeric))
                .collect()
        })
        .collect()
}

fn column_is_numeric(text: &[Vec<String>], col: usize) -> bool {
    text.iter()
        .filter_map(|row| row.get(col))
        .filter(|s| !s.is_empty())
        .all(|s| s.parse::<f64>().is_ok())
}

fn typed_cell(s: &str, numeric: bool) -> CellValue {
    if s.is_empty() {
        CellValue::Empty
    } else if numeric {
        match s.parse::<f64>() {
            Ok(x) => CellValue::Number(x),
            Err(_) => CellValue::Text(s.to_string()),
        }
    } else {
        CellValue::Text(s.to_string())
    }
}
