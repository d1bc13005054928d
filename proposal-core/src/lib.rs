//! proposal-core: load proposal spreadsheets and build diagnostic reports
//!
//! A spreadsheet is loaded into an in-memory [`Table`] and handed to one of
//! the reports: duplicate identifiers, a full-row name search, or a schema
//! preview.

pub mod config;
pub mod error;
pub mod reader;
pub mod render;
pub mod report;

pub use config::ReportConfig;
pub use error::{Result, TableError};
pub use reader::{CellValue, Table, load_table};
pub use report::{DuplicateReporter, NameSearchReporter, SchemaPreviewer, TableReport};

use std::path::Path;
use tracing::info;

/// Load a spreadsheet and run a single report over it
pub fn run_report<R, P>(report: &R, path: P) -> Result<R::Output>
where
    R: TableReport,
    P: AsRef<Path>,
{
    let table = load_table(path)?;
    let output = report.build(&table)?;
    info!(report = report.id(), rows = table.len(), "report built");
    Ok(output)
}
