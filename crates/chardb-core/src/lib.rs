//! chardb-core: Core library for game character databases
//!
//! This library provides functionality to:
//! - Parse `Character "...": Damage: ...` lines into records
//! - Rank same-named records into numbered forms by average stats
//! - Sort and filter the catalog through explicit view state
//! - Prepare and write export rows (CSV or JSON)
//! - Load database text from URLs or local files, with fallback

pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod forms;
pub mod parser;
pub mod query;
pub mod record;
pub mod source;

pub use catalog::{build_records, Catalog, CatalogStats};
pub use config::CatalogConfig;
pub use error::{Error, Result};
pub use export::{
    export_to_file, prepare_export_rows, write_csv, write_json, ExportFormat, ExportRow,
    DEFAULT_SHEET_NAME, EXPORT_HEADERS,
};
pub use forms::derive_forms;
pub use parser::{parse_line, parse_number, parse_str};
pub use query::{filter, sort_by, BeastFilter, SortDirection, SortField, SortSpec, ViewState};
pub use record::{CharacterRecord, RawRecord};
pub use source::{load_first, TextSource};
