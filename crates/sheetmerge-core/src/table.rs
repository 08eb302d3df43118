//! In-memory table and schema-union merge

use std::collections::{HashMap, HashSet};

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::value::CellValue;

/// A parsed table: named columns and rows of cells
///
/// Every row holds exactly `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Create an empty table with the given columns
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, null-padding or truncating it to the column count
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Null);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a cell by row index and column name
    pub fn get(&self, row: usize, column: &str) -> Option<&CellValue> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// Concatenate tables row-wise by column-name union
    ///
    /// Columns appear in order of first appearance across the inputs. Rows keep
    /// input order; cells for columns a source table lacks are null.
    pub fn concat(tables: impl IntoIterator<Item = Table>) -> Table {
        let tables: Vec<Table> = tables.into_iter().collect();

        let mut columns: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for table in &tables {
            for column in &table.columns {
                if !index.contains_key(column) {
                    index.insert(column.clone(), columns.len());
                    columns.push(column.clone());
                }
            }
        }

        let total_rows = tables.iter().map(Table::len).sum();
        let mut merged = Table {
            rows: Vec::with_capacity(total_rows),
            columns,
        };

        for table in tables {
            let positions: Vec<usize> = table.columns.iter().map(|c| index[c]).collect();
            for row in table.rows {
                let mut out = vec![CellValue::Null; merged.columns.len()];
                for (cell, &pos) in row.into_iter().zip(&positions) {
                    out[pos] = cell;
                }
                merged.rows.push(out);
            }
        }

        merged
    }
}

/// Normalize raw header cells into unique column names
///
/// Blank headers become `Unnamed: <position>`. Repeated names get a numeric
/// suffix: `a`, `a.1`, `a.2`.
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let named: Vec<String> = raw
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let name = name.as_ref();
            if name.trim().is_empty() {
                format!("Unnamed: {}", i)
            } else {
                name.to_string()
            }
        })
        .collect();

    let mut used: HashSet<String> = HashSet::with_capacity(named.len());
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut columns = Vec::with_capacity(named.len());

    for name in named {
        let mut candidate = name.clone();
        if used.contains(&candidate) {
            let count = counts.entry(name.clone()).or_insert(0);
            loop {
                *count += 1;
                candidate = format!("{}.{}", name, count);
                if !used.contains(&candidate) {
                    break;
                }
            }
        }
        used.insert(candidate.clone());
        columns.push(candidate);
    }

    columns
}

/// One row borrowed for serialization as a JSON object
struct RowRef<'a> {
    columns: &'a [String],
    cells: &'a [CellValue],
}

impl Serialize for RowRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, cell) in self.columns.iter().zip(self.cells) {
            map.serialize_entry(column, cell)?;
        }
        map.end()
    }
}

/// Serializes as an array of row objects, keys in column order
impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for cells in &self.rows {
            seq.serialize_element(&RowRef {
                columns: &self.columns,
                cells,
            })?;
        }
        seq.end()
    }
}
