//! Spreadsheet reader
//!
//! Reads the first worksheet of an `.xlsx` workbook. The first row is the
//! header; cells keep the type the workbook stored them with.

use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};

use crate::error::ParseError;
use crate::table::{normalize_headers, Table};
use crate::value::CellValue;

/// Read the first worksheet of an `.xlsx` file
pub fn read_xlsx(path: &Path) -> Result<Table, ParseError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ParseError::NoWorksheet)??;

    table_from_rows(range.rows())
}

/// Build a table from worksheet rows, header first
pub fn table_from_rows<'a, I>(rows: I) -> Result<Table, ParseError>
where
    I: IntoIterator<Item = &'a [Data]>,
{
    let mut rows = rows.into_iter();
    let header = rows.next().ok_or(ParseError::MissingHeader)?;
    if header.is_empty() {
        return Err(ParseError::MissingHeader);
    }

    let columns = normalize_headers(header.iter().map(header_text));
    let mut body: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    while body
        .last()
        .is_some_and(|row| row.iter().all(CellValue::is_null))
    {
        body.pop();
    }

    let mut table = Table::new(columns);
    for row in body {
        table.push_row(row);
    }
    Ok(table)
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => match cell_value(other) {
            CellValue::Int(i) => i.to_string(),
            CellValue::String(s) => s,
            _ => other.to_string(),
        },
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::from_f64(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::DateTime(dt) => match dt.as_datetime() {
            // NaiveDateTime's Debug form is ISO-8601 (`2024-01-15T12:00:00`)
            Some(datetime) if dt.is_datetime() => CellValue::String(format!("{:?}", datetime)),
            _ => CellValue::from_f64(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{CellErrorType, ExcelDateTime, ExcelDateTimeType};
    use std::io::Write;

    fn fixture(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    fn build(rows: Vec<Vec<Data>>) -> Result<Table, ParseError> {
        table_from_rows(rows.iter().map(Vec::as_slice))
    }

    #[test]
    fn test_cells_keep_workbook_types() {
        let table = build(vec![
            vec![
                Data::String("name".into()),
                Data::String("age".into()),
                Data::String("gpa".into()),
                Data::String("enrolled".into()),
            ],
            vec![
                Data::String("ann".into()),
                Data::Float(20.0),
                Data::Float(3.7),
                Data::Bool(true),
            ],
            vec![
                Data::String("bob".into()),
                Data::Int(22),
                Data::Empty,
                Data::Bool(false),
            ],
        ])
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0, "age"), Some(&CellValue::Int(20)));
        assert_eq!(table.get(0, "gpa"), Some(&CellValue::Float(3.7)));
        assert_eq!(table.get(1, "age"), Some(&CellValue::Int(22)));
        assert_eq!(table.get(1, "gpa"), Some(&CellValue::Null));
        assert_eq!(table.get(1, "enrolled"), Some(&CellValue::Bool(false)));
    }

    #[test]
    fn test_date_and_error_cells() {
        let table = build(vec![
            vec![
                Data::String("taken".into()),
                Data::String("elapsed".into()),
                Data::String("stamp".into()),
                Data::String("ratio".into()),
            ],
            vec![
                Data::DateTime(ExcelDateTime::new(45306.5, ExcelDateTimeType::DateTime, false)),
                Data::DateTime(ExcelDateTime::new(3.0, ExcelDateTimeType::TimeDelta, false)),
                Data::DateTimeIso("2024-01-15T12:00:00".into()),
                Data::Error(CellErrorType::Div0),
            ],
        ])
        .unwrap();

        assert_eq!(table.get(0, "taken"), Some(&CellValue::from("2024-01-15T12:00:00")));
        assert_eq!(table.get(0, "elapsed"), Some(&CellValue::Int(3)));
        assert_eq!(table.get(0, "stamp"), Some(&CellValue::from("2024-01-15T12:00:00")));
        assert_eq!(table.get(0, "ratio"), Some(&CellValue::from("#DIV/0!")));
    }

    #[test]
    fn test_read_workbook_first_sheet() {
        let table = read_xlsx(&fixture("scores.xlsx")).unwrap();

        assert_eq!(table.columns(), &["y", "w", "taken", "stamp", "ratio"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0, "y"), Some(&CellValue::from("q")));
        assert_eq!(table.get(0, "w"), Some(&CellValue::Int(5)));
        assert_eq!(table.get(0, "taken"), Some(&CellValue::from("2024-01-15T12:00:00")));
        assert_eq!(table.get(0, "stamp"), Some(&CellValue::from("2024-01-15T12:00:00")));
        assert_eq!(table.get(0, "ratio"), Some(&CellValue::from("#DIV/0!")));
        assert_eq!(table.get(1, "w"), Some(&CellValue::Float(2.5)));
        assert_eq!(table.get(1, "taken"), Some(&CellValue::Null));
        assert_eq!(table.get(1, "ratio"), Some(&CellValue::Bool(true)));
    }

    #[test]
    fn test_trailing_empty_rows_dropped() {
        let table = build(vec![
            vec![Data::String("a".into())],
            vec![Data::Int(1)],
            vec![Data::Empty],
            vec![Data::Empty],
        ])
        .unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_numeric_and_blank_headers() {
        let table = build(vec![
            vec![Data::Float(2024.0), Data::Empty, Data::String("x".into())],
            vec![Data::Int(1), Data::Int(2), Data::Int(3)],
        ])
        .unwrap();
        assert_eq!(table.columns(), &["2024", "Unnamed: 1", "x"]);
    }

    #[test]
    fn test_no_rows_is_error() {
        assert!(matches!(build(vec![]), Err(ParseError::MissingHeader)));
    }

    #[test]
    fn test_corrupt_workbook_is_error() {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        file.write_all(b"this is not a zip archive").unwrap();

        let result = read_xlsx(file.path());
        assert!(matches!(result, Err(ParseError::Spreadsheet(_))));
    }
}
