//! CSV reader with per-column type inference
//!
//! The first record is the header. Each column is typed independently from its
//! non-missing cells, narrowest first: integer, float, boolean, then text.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::ParseError;
use crate::table::{normalize_headers, Table};
use crate::value::CellValue;

/// Cell contents treated as missing
const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Bool,
    Text,
}

/// Read a CSV file from disk
pub fn read_csv(path: &Path) -> Result<Table, ParseError> {
    let file = File::open(path)?;
    read_csv_from(BufReader::new(file))
}

/// Read CSV data from any reader
pub fn read_csv_from<R: Read>(reader: R) -> Result<Table, ParseError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = csv_reader.records();

    let header = match records.next() {
        Some(record) => record?,
        None => return Err(ParseError::MissingHeader),
    };
    let columns = normalize_headers(header.iter());
    let width = columns.len();

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for result in records {
        let record = result?;
        if record.len() > width {
            return Err(ParseError::RaggedRow {
                line: record.position().map(|p| p.line()).unwrap_or(0),
                expected: width,
                found: record.len(),
            });
        }
        raw_rows.push(record.iter().map(str::to_string).collect());
    }

    let kinds: Vec<ColumnKind> = (0..width)
        .map(|col| infer_kind(raw_rows.iter().filter_map(|row| row.get(col))))
        .collect();

    let mut table = Table::new(columns);
    for raw in raw_rows {
        let row = raw
            .iter()
            .zip(&kinds)
            .map(|(cell, &kind)| convert_cell(cell, kind))
            .collect();
        table.push_row(row);
    }

    Ok(table)
}

fn is_missing(cell: &str) -> bool {
    NA_VALUES.contains(&cell)
}

fn parse_bool(cell: &str) -> Option<bool> {
    if cell.eq_ignore_ascii_case("true") {
        Some(true)
    } else if cell.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn infer_kind<'a>(cells: impl Iterator<Item = &'a String>) -> ColumnKind {
    let values: Vec<&str> = cells
        .map(String::as_str)
        .filter(|c| !is_missing(c))
        .map(str::trim)
        .collect();

    if values.iter().all(|v| v.parse::<i64>().is_ok()) {
        ColumnKind::Int
    } else if values.iter().all(|v| v.parse::<f64>().is_ok()) {
        ColumnKind::Float
    } else if values.iter().all(|v| parse_bool(v).is_some()) {
        ColumnKind::Bool
    } else {
        ColumnKind::Text
    }
}

fn convert_cell(cell: &str, kind: ColumnKind) -> CellValue {
    if is_missing(cell) {
        return CellValue::Null;
    }
    let trimmed = cell.trim();
    // Inference guarantees the parses below succeed for their column kind
    match kind {
        ColumnKind::Int => trimmed
            .parse::<i64>()
            .map(CellValue::Int)
            .unwrap_or(CellValue::Null),
        ColumnKind::Float => trimmed
            .parse::<f64>()
            .map(CellValue::Float)
            .unwrap_or(CellValue::Null),
        ColumnKind::Bool => parse_bool(trimmed)
            .map(CellValue::Bool)
            .unwrap_or(CellValue::Null),
        ColumnKind::Text => CellValue::String(cell.to_string()),
    }
}
