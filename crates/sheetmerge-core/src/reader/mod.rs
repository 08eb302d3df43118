//! Tabular file readers
//!
//! Recognized formats are selected by filename suffix. Each reader turns one
//! stored file into a [`Table`] or a [`ParseError`].

pub mod csv_reader;
pub mod xlsx_reader;

use std::fmt;
use std::path::Path;

use crate::error::ParseError;
use crate::table::Table;

/// Supported stored-file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableFormat {
    /// Comma-separated values (`.csv`)
    Csv,
    /// Office Open XML workbook (`.xlsx`)
    Xlsx,
}

impl TableFormat {
    /// Detect the format from a filename suffix (case-sensitive)
    pub fn from_filename(name: &str) -> Option<Self> {
        if name.ends_with(".csv") {
            Some(TableFormat::Csv)
        } else if name.ends_with(".xlsx") {
            Some(TableFormat::Xlsx)
        } else {
            None
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableFormat::Csv => f.write_str("csv"),
            TableFormat::Xlsx => f.write_str("xlsx"),
        }
    }
}

/// Read a file as a table using the parser for `format`
pub fn read_table(path: &Path, format: TableFormat) -> Result<Table, ParseError> {
    match format {
        TableFormat::Csv => csv_reader::read_csv(path),
        TableFormat::Xlsx => xlsx_reader::read_xlsx(path),
    }
}
