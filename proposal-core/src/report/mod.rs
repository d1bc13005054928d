//! Report system

pub mod duplicates;
pub mod name_search;
pub mod preview;

use crate::error::Result;
use crate::reader::Table;
use serde::Serialize;
use std::fmt;

pub use duplicates::{DuplicateEntry, DuplicateReport, DuplicateReporter};
pub use name_search::{NameSearchReport, NameSearchReporter};
pub use preview::{SchemaPreview, SchemaPreviewer};

/// Trait implemented by every report over a loaded table
pub trait TableReport: Send + Sync {
    /// Rendered output; `Display` gives the human format, `Serialize` the JSON one
    type Output: Serialize + fmt::Display;

    /// Short report identifier used in logs
    fn id(&self) -> &str;

    /// Build the report from a loaded table
    fn build(&self, table: &Table) -> Result<Self::Output>;
}
