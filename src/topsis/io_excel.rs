use calamine::{open_workbook_auto, DataType, Range, Reader};

use crate::topsis::{io_common::InputTable, *};

pub fn read_excel_table(path: &str, worksheet_name: Option<&str>) -> CliResult<InputTable> {
    let wrange = get_range(path, worksheet_name)?;

    let mut iter = wrange.rows();
    let headers: Vec<String> = iter
        .next()
        .map(|header| header.iter().map(cell_text).collect())
        .unwrap_or_default();
    debug!("read_excel_table: header: {:?}", headers);

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    let mut source_text: Vec<Vec<String>> = Vec::new();
    for (idx, row) in iter.enumerate() {
        debug!("read_excel_table: idx: {:?} row: {:?}", idx, row);
        rows.push(row.iter().map(cell_value).collect());
        source_text.push(row.iter().map(cell_text).collect());
    }

    // As with delimited files, a single text name makes the whole column of names text.
    let names_are_text = rows
        .iter()
        .any(|row| matches!(row.first(), Some(CellValue::Text(_))));
    if names_are_text {
        for (row, text) in rows.iter_mut().zip(source_text.iter()) {
            if let (Some(cell @ CellValue::Number(_)), Some(s)) = (row.first_mut(), text.first()) {
                *cell = CellValue::Text(s.clone());
            }
        }
    }

    Ok(InputTable {
        raw: RawTable { headers, rows },
        source_text,
        delimiter: b',',
    })
}

fn get_range(path: &str, worksheet_name: Option<&str>) -> CliResult<Range<DataType>> {
    debug!(
        "read_excel_table: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    let mut workbook = open_workbook_auto(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(name) = worksheet_name {
        workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { path, name })?
            .context(OpeningExcelSnafu { path })
    } else {
        workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })
    }
}

/// The type of a spreadsheet cell. Anything that is not a string or a number is kept as
/// text so that it is rejected in a criterion column.
pub fn cell_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::Empty => CellValue::Empty,
        DataType::String(s) if s.trim().is_empty() => CellValue::Empty,
        DataType::String(s) => CellValue::Text(s.clone()),
        DataType::Float(x) => CellValue::Number(*x),
        DataType::Int(i) => CellValue::Number(*i as f64),
        other => CellValue::Text(cell_text(other)),
    }
}

pub fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::Empty => String::new(),
        DataType::String(s) => s.clone(),
        DataType::Float(x) => x.to_string(),
        DataType::Int(i) => i.to_string(),
        DataType::Bool(b) => b.to_string(),
        other => format!("{:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spreadsheet_cells() {
        assert_eq!(
            cell_value(&DataType::String("M1".to_string())),
            CellValue::Text("M1".to_string())
        );
        assert_eq!(cell_value(&DataType::Float(2.5)), CellValue::Number(2.5));
        assert_eq!(cell_value(&DataType::Int(3)), CellValue::Number(3.0));
        assert_eq!(cell_value(&DataType::Empty), CellValue::Empty);
        assert_eq!(
            cell_value(&DataType::String("  ".to_string())),
            CellValue::Empty
        );
        assert_eq!(
            cell_value(&DataType::Bool(true)),
            CellValue::Text("true".to_string())
        );
    }

    #[test]
    fn spreadsheet_text() {
        assert_eq!(cell_text(&DataType::Float(16.0)), "16");
        assert_eq!(cell_text(&DataType::Float(0.25)), "0.25");
        assert_eq!(cell_text(&DataType::Int(12)), "12");
        assert_eq!(cell_text(&DataType::Empty), "");
    }

    fn data_path(name: &str) -> String {
        format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    #[test]
    fn missing_workbook() {
        let err = read_excel_table(&data_path("does_not_exist.xlsx"), None).unwrap_err();
        assert!(matches!(err, CliError::OpeningExcel { .. }));
    }

    #[test]
    fn first_worksheet_by_default() {
        let table = read_excel_table(&data_path("mobiles.xlsx"), None).unwrap();
        assert_eq!(
            table.raw.headers,
            vec!["Model", "Price", "Storage", "Camera", "Looks"]
        );
        assert_eq!(table.raw.rows.len(), 5);
        assert_eq!(table.raw.rows[0][0], CellValue::Text("M1".to_string()));
        assert_eq!(table.raw.rows[0][1], CellValue::Number(250.0));
        assert_eq!(table.source_text[0][1], "250");
        assert_eq!(table.delimiter, b',');

        // Same content as the delimited version of the data.
        let csv = crate::topsis::io_csv::read_csv_table(&data_path("mobiles.csv"), b',').unwrap();
        assert_eq!(table.raw, csv.raw);
        assert_eq!(table.source_text, csv.source_text);
    }

    #[test]
    fn worksheet_by_name() {
        let table = read_excel_table(&data_path("mobiles.xlsx"), Some("Mixed")).unwrap();
        assert_eq!(table.raw.headers, vec!["Name", "C1", "C2"]);
        assert_eq!(table.raw.rows.len(), 3);
        assert_eq!(table.raw.rows[0][0], CellValue::Text("Alpha".to_string()));
        assert_eq!(table.raw.rows[1][0], CellValue::Text("2".to_string()));
        assert_eq!(table.raw.rows[1][1], CellValue::Number(2.0));
    }

    #[test]
    fn missing_worksheet() {
        let err = read_excel_table(&data_path("mobiles.xlsx"), Some("Tablets")).unwrap_err();
        match err {
            CliError::MissingWorksheet { name, .. } => assert_eq!(name, "Tablets"),
            x => panic!("expected a missing worksheet, got {:?}", x),
        }
    }
}
