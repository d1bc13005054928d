//! Error types for table loading and report building

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    /// The file could not be opened or is not a recognised spreadsheet
    #[error("Failed to open workbook {}: {message}", .path.display())]
    Open { path: PathBuf, message: String },

    #[error("Workbook {} contains no worksheets", .0.display())]
    NoWorksheet(PathBuf),

    /// The worksheet exists but its cells could not be read
    #[error("Failed to read worksheet '{sheet}': {message}")]
    Read { sheet: String, message: String },

    #[error("Column '{0}' not found")]
    MissingColumn(String),

    #[error("Invalid search pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, TableError>;
