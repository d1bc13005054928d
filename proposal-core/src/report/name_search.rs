//! Full-row name search

use super::TableReport;
use crate::config::ReportConfig;
use crate::error::{Result, TableError};
use crate::reader::{CellValue, Table};
use rayon::prelude::*;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Finds rows where any cell matches a case-insensitive pattern
pub struct NameSearchReporter {
    pattern: Regex,
    label: String,
    title_columns: Vec<String>,
}

impl NameSearchReporter {
    pub fn new(config: &ReportConfig) -> Result<Self> {
        let pattern = RegexBuilder::new(&config.search.target)
            .case_insensitive(true)
            .build()
            .map_err(|source| TableError::InvalidPattern {
                pattern: config.search.target.clone(),
                source,
            })?;

        Ok(Self {
            pattern,
            label: config.search.label.clone(),
            title_columns: config.search.title_columns.clone(),
        })
    }

    /// Whether any cell of the row contains the pattern
    pub fn row_matches(&self, row: &[CellValue]) -> bool {
        row.iter().any(|cell| self.pattern.is_match(&cell.search_text()))
    }

    /// First configured title column present in the table
    fn title_column(&self, table: &Table) -> Option<(usize, String)> {
        self.title_columns
            .iter()
            .find_map(|name| table.column_index(name).map(|idx| (idx, name.clone())))
    }
}

/// Titles are listed as plain values, so a missing title reads `nan`
fn title_text(cell: &CellValue) -> String {
    match cell {
        CellValue::Empty => "nan".to_string(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NameSearchReport {
    pub label: String,
    pub count: usize,
    /// Positions of the matching rows in the loaded table
    pub rows: Vec<usize>,
    /// Title column used, if the table has one
    pub title_column: Option<String>,
    /// Titles of the matching rows, present only with a title column
    pub titles: Option<Vec<String>>,
}

impl TableReport for NameSearchReporter {
    type Output = NameSearchReport;

    fn id(&self) -> &str {
        "name-search"
    }

    fn build(&self, table: &Table) -> Result<NameSearchReport> {
        let rows: Vec<usize> = table
            .rows
            .par_iter()
            .enumerate()
            .filter(|(_, row)| self.row_matches(row))
            .map(|(idx, _)| idx)
            .collect();
        debug!(pattern = %self.pattern, matches = rows.len(), "name search finished");

        let title = self.title_column(table);
        if title.is_none() {
            debug!("no title column present, skipping titles");
        }
        let titles = title.as_ref().map(|(col, _)| {
            rows.iter()
                .map(|&row| title_text(table.cell(row, *col)))
                .collect()
        });

        Ok(NameSearchReport {
            label: self.label.clone(),
            count: rows.len(),
            rows,
            title_column: title.map(|(_, name)| name),
            titles,
        })
    }
}

impl fmt::Display for NameSearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Number of proposals involving {}: {}", self.label, self.count)?;

        if let Some(titles) = &self.titles {
            writeln!(f)?;
            writeln!(f)?;
            write!(f, "Proposal titles:")?;
            for (i, title) in titles.iter().enumerate() {
                write!(f, "\n  {}. {}", i + 1, title)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn reporter() -> NameSearchReporter {
        NameSearchReporter::new(&ReportConfig::default()).unwrap()
    }

    fn table(columns: &[&str], rows: Vec<Vec<CellValue>>) -> Table {
        let mut table = Table::new(columns.iter().map(|c| c.to_string()).collect());
        for row in rows {
            table.push_row(row);
        }
        table
    }

    #[test]
    fn test_uppercase_name_matches() {
        let table = table(
            &["PI", "Project Title"],
            vec![vec![text("TOMMY DANG"), text("X")]],
        );

        let report = reporter().build(&table).unwrap();
        assert_eq!(report.count, 1);
        assert_eq!(report.titles, Some(vec!["X".to_string()]));
        assert_eq!(
            report.to_string(),
            "Number of proposals involving Dr. Tommy Dang: 1\n\nProposal titles:\n  1. X"
        );
    }

    #[test]
    fn test_match_in_any_column_keeps_row_order() {
        let table = table(
            &["PI", "Co-PIs", "Project Title"],
            vec![
                vec![text("Someone"), text("alice, tommy dang"), text("First")],
                vec![text("Nobody"), CellValue::Empty, text("Skipped")],
                vec![text("Dr. Tommy Dang"), CellValue::Empty, text("Third")],
            ],
        );

        let report = reporter().build(&table).unwrap();
        assert_eq!(report.rows, vec![0, 2]);
        assert_eq!(
            report.titles,
            Some(vec!["First".to_string(), "Third".to_string()])
        );
        assert!(report.to_string().ends_with("  1. First\n  2. Third"));
    }

    #[test]
    fn test_missing_title_is_listed_as_nan() {
        let table = table(
            &["PI", "Project Title"],
            vec![
                vec![text("Tommy Dang"), CellValue::Empty],
                vec![text("Tommy Dang"), text("Z")],
            ],
        );

        let report = reporter().build(&table).unwrap();
        assert_eq!(
            report.titles,
            Some(vec!["nan".to_string(), "Z".to_string()])
        );
        assert!(report.to_string().ends_with("  1. nan\n  2. Z"));
    }

    #[test]
    fn test_alternate_title_column() {
        let table = table(&["PI", "title"], vec![vec![text("Tommy Dang"), text("Y")]]);
        let report = reporter().build(&table).unwrap();
        assert_eq!(report.title_column.as_deref(), Some("title"));
        assert_eq!(report.titles, Some(vec!["Y".to_string()]));
    }

    #[test]
    fn test_preferred_title_column_wins() {
        let table = table(
            &["title", "Project Title", "PI"],
            vec![vec![text("short"), text("long"), text("Tommy Dang")]],
        );
        let report = reporter().build(&table).unwrap();
        assert_eq!(report.title_column.as_deref(), Some("Project Title"));
        assert_eq!(report.titles, Some(vec!["long".to_string()]));
    }

    #[test]
    fn test_without_title_column_only_count_is_printed() {
        let table = table(&["PI"], vec![vec![text("tommy dang")]]);
        let report = reporter().build(&table).unwrap();
        assert_eq!(report.count, 1);
        assert!(report.titles.is_none());
        assert_eq!(
            report.to_string(),
            "Number of proposals involving Dr. Tommy Dang: 1"
        );
    }

    #[test]
    fn test_no_matches() {
        let table = table(
            &["PI", "Project Title"],
            vec![vec![text("Ada"), text("Engines")]],
        );
        let report = reporter().build(&table).unwrap();
        assert_eq!(report.count, 0);
        assert_eq!(report.titles, Some(Vec::new()));
        assert_eq!(
            report.to_string(),
            "Number of proposals involving Dr. Tommy Dang: 0\n\nProposal titles:"
        );
    }

    #[test]
    fn test_empty_cells_never_match() {
        let mut config = ReportConfig::default();
        config.search.target = "nan".to_string();
        let reporter = NameSearchReporter::new(&config).unwrap();
        assert!(!reporter.row_matches(&[CellValue::Empty, CellValue::Int(3)]));
        assert!(reporter.row_matches(&[text("Financial")]));
    }

    #[test]
    fn test_numbers_are_searched_as_text() {
        let mut config = ReportConfig::default();
        config.search.target = "2024".to_string();
        let reporter = NameSearchReporter::new(&config).unwrap();
        assert!(reporter.row_matches(&[CellValue::Int(20240)]));
    }

    #[test]
    fn test_invalid_pattern() {
        let mut config = ReportConfig::default();
        config.search.target = "(unclosed".to_string();
        let err = NameSearchReporter::new(&config).err().unwrap();
        assert!(matches!(err, TableError::InvalidPattern { .. }));
    }
}
