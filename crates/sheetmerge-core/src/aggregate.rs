//! Merge every stored table into one dataset
//!
//! Each recognized file is parsed on its own; a file that fails to parse is
//! logged and left out while the rest still merge.

use crate::error::{ParseError, StoreResult};
use crate::reader::{read_table, TableFormat};
use crate::store::{StoredFile, UploadStore};
use crate::table::Table;

/// Outcome of parsing one stored file
#[derive(Debug)]
pub struct FileOutcome {
    pub file: StoredFile,
    pub format: TableFormat,
    pub result: Result<Table, ParseError>,
}

/// Parse every recognized file in the store, in listing order
pub fn parse_stored(store: &UploadStore) -> StoreResult<Vec<FileOutcome>> {
    let outcomes = store
        .list()?
        .into_iter()
        .filter_map(|file| {
            let format = TableFormat::from_filename(&file.name)?;
            let result = read_table(&file.path, format);
            Some(FileOutcome {
                file,
                format,
                result,
            })
        })
        .collect();
    Ok(outcomes)
}

/// Parse and merge all stored tables by column-name union
///
/// Blocking; reads the directory as it is at call time.
pub fn aggregate(store: &UploadStore) -> StoreResult<Table> {
    let outcomes = parse_stored(store)?;
    let total = outcomes.len();

    let tables: Vec<Table> = outcomes
        .into_iter()
        .filter_map(|outcome| match outcome.result {
            Ok(table) => {
                tracing::debug!(
                    filename = %outcome.file.name,
                    format = %outcome.format,
                    rows = table.len(),
                    "Parsed upload"
                );
                Some(table)
            }
            Err(e) => {
                tracing::warn!(
                    filename = %outcome.file.name,
                    format = %outcome.format,
                    error = %e,
                    "Skipping unreadable upload"
                );
                None
            }
        })
        .collect();

    let parsed = tables.len();
    let merged = Table::concat(tables);

    tracing::info!(
        files = total,
        parsed,
        rows = merged.len(),
        columns = merged.columns().len(),
        "Aggregated uploads"
    );

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::CellValue;
    use serde_json::json;

    fn store_with(files: &[(&str, &str)]) -> (tempfile::TempDir, UploadStore) {
        let dir = tempfile::tempdir().unwrap();
        for (name, data) in files {
            std::fs::write(dir.path().join(name), data).unwrap();
        }
        let store = UploadStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_single_file() {
        let (_dir, store) = store_with(&[("a.csv", "x,y\n1,a\n2,b\n")]);

        let merged = aggregate(&store).unwrap();
        assert_eq!(
            serde_json::to_value(&merged).unwrap(),
            json!([{"x": 1, "y": "a"}, {"x": 2, "y": "b"}])
        );
    }

    #[test]
    fn test_union_of_columns() {
        let (_dir, store) = store_with(&[
            ("a.csv", "x,y\n1,a\n"),
            ("b.csv", "y,z\nb,2\n"),
        ]);

        let merged = aggregate(&store).unwrap();
        assert_eq!(
            serde_json::to_value(&merged).unwrap(),
            json!([
                {"x": 1, "y": "a", "z": null},
                {"x": null, "y": "b", "z": 2}
            ])
        );
    }

    #[test]
    fn test_workbook_merges_with_csv() {
        let (dir, store) = store_with(&[("a.csv", "x,y\n1,a\n")]);
        let fixture = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures/scores.xlsx");
        std::fs::copy(fixture, dir.path().join("b.xlsx")).unwrap();

        let merged = aggregate(&store).unwrap();
        assert_eq!(
            merged.columns(),
            &["x", "y", "w", "taken", "stamp", "ratio"]
        );
        assert_eq!(
            serde_json::to_value(&merged).unwrap(),
            json!([
                {"x": 1, "y": "a", "w": null, "taken": null, "stamp": null, "ratio": null},
                {
                    "x": null,
                    "y": "q",
                    "w": 5,
                    "taken": "2024-01-15T12:00:00",
                    "stamp": "2024-01-15T12:00:00",
                    "ratio": "#DIV/0!"
                },
                {"x": null, "y": "r", "w": 2.5, "taken": null, "stamp": null, "ratio": true}
            ])
        );
    }

    #[test]
    fn test_corrupt_files_are_skipped() {
        let (_dir, store) = store_with(&[
            ("a.csv", "x\n1\n"),
            ("broken.xlsx", "definitely not a workbook"),
            ("ragged.csv", "a\n1,2,3\n"),
            ("empty.csv", ""),
        ]);

        let outcomes = parse_stored(&store).unwrap();
        assert_eq!(outcomes.len(), 4);
        assert_eq!(outcomes.iter().filter(|o| o.result.is_err()).count(), 3);

        let merged = aggregate(&store).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.get(0, "x"), Some(&CellValue::Int(1)));
    }

    #[test]
    fn test_unrecognized_extensions_ignored() {
        let (_dir, store) = store_with(&[("notes.txt", "x\n1\n"), ("old.xls", "x\n1\n")]);

        assert!(parse_stored(&store).unwrap().is_empty());
        assert!(aggregate(&store).unwrap().is_empty());
    }

    #[test]
    fn test_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("never-created"));

        let merged = aggregate(&store).unwrap();
        assert_eq!(serde_json::to_value(&merged).unwrap(), json!([]));
    }
}
