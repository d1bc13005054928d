//! Duplicate identifiers

use super::TableReport;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::reader::{CellKey, CellValue, Table};
use crate::render::render_table;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Counts rows and distinct identifiers, and samples rows whose identifier repeats.
///
/// Every occurrence of a repeated identifier is selected, including the first.
pub struct DuplicateReporter {
    id_column: String,
    pi_column: String,
    sample_size: usize,
}

impl DuplicateReporter {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            id_column: config.id_column.clone(),
            pi_column: config.pi_column.clone(),
            sample_size: config.duplicates.sample_size,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DuplicateReport {
    pub total_rows: usize,
    /// Distinct non-empty identifiers
    pub unique_proposals: usize,
    /// Rows sharing an identifier with at least one other row, before sampling
    pub duplicate_rows: usize,
    pub sample: Vec<DuplicateEntry>,
    #[serde(skip)]
    id_column: String,
    #[serde(skip)]
    pi_column: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateEntry {
    /// Position of the row in the loaded table
    pub index: usize,
    pub id: CellValue,
    pub pi: CellValue,
}

impl TableReport for DuplicateReporter {
    type Output = DuplicateReport;

    fn id(&self) -> &str {
        "duplicates"
    }

    fn build(&self, table: &Table) -> Result<DuplicateReport> {
        let id_col = table.require_column(&self.id_column)?;
        let pi_col = table.require_column(&self.pi_column)?;

        let keys: Vec<CellKey> = table.column(id_col).map(CellValue::key).collect();
        let mut counts: HashMap<&CellKey, usize> = HashMap::new();
        for key in &keys {
            *counts.entry(key).or_default() += 1;
        }
        let unique_proposals = counts.keys().filter(|k| ***k != CellKey::Empty).count();

        let mut selected: Vec<usize> = keys
            .iter()
            .enumerate()
            .filter(|(_, key)| counts[key] > 1)
            .map(|(row, _)| row)
            .collect();
        // Stable, so rows sharing an identifier keep their table order
        selected.sort_by(|&a, &b| table.cell(a, id_col).sort_cmp(table.cell(b, id_col)));
        let duplicate_rows = selected.len();
        debug!(duplicate_rows, unique_proposals, "duplicate scan finished");

        let sample = selected
            .into_iter()
            .take(self.sample_size)
            .map(|row| DuplicateEntry {
                index: row,
                id: table.cell(row, id_col).clone(),
                pi: table.cell(row, pi_col).clone(),
            })
            .collect();

        Ok(DuplicateReport {
            total_rows: table.len(),
            unique_proposals,
            duplicate_rows,
            sample,
            id_column: self.id_column.clone(),
            pi_column: self.pi_column.clone(),
        })
    }
}

impl DuplicateReport {
    /// Sample rows as a two-column table, with their original row indices
    pub fn sample_table(&self) -> (Table, Vec<usize>) {
        let mut table = Table::new(vec![self.id_column.clone(), self.pi_column.clone()]);
        for entry in &self.sample {
            table.push_row(vec![entry.id.clone(), entry.pi.clone()]);
        }
        let index = self.sample.iter().map(|e| e.index).collect();
        (table, index)
    }
}

impl fmt::Display for DuplicateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (table, index) = self.sample_table();
        writeln!(f, "Total rows: {}", self.total_rows)?;
        writeln!(f, "Unique proposals: {}", self.unique_proposals)?;
        writeln!(f)?;
        writeln!(f, "Duplicate proposal examples:")?;
        write!(f, "{}", render_table(&table, &index))
    }
}
