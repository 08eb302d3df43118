//! sheetmerge-core - Tabular upload storage and merge
//!
//! This crate holds everything below the HTTP layer: the cell and table model,
//! CSV and spreadsheet readers, the upload directory store, and the aggregator
//! that merges every stored file into one dataset.

pub mod aggregate;
pub mod error;
pub mod reader;
pub mod store;
pub mod table;
pub mod value;

pub use aggregate::{aggregate, parse_stored, FileOutcome};
pub use error::{IngestError, ParseError, StoreError, StoreResult};
pub use reader::{read_table, TableFormat};
pub use store::{validate_filename, StoredFile, UploadStore};
pub use table::Table;
pub use value::CellValue;
