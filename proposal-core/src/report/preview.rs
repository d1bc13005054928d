//! Schema preview

use super::TableReport;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::reader::{Table, load_table};
use crate::render::{render_column_list, render_table};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::warn;

pub struct SchemaPreviewer {
    rows: usize,
}

impl SchemaPreviewer {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            rows: config.preview.rows,
        }
    }

    /// Load `path` and render its preview, or the load error's description.
    ///
    /// Never fails: a file that cannot be loaded yields only the error text.
    pub fn preview_or_error<P: AsRef<Path>>(&self, path: P) -> String {
        match load_table(path).and_then(|table| self.build(&table)) {
            Ok(preview) => preview.to_string(),
            Err(e) => {
                warn!(error = %e, "preview failed");
                e.to_string()
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemaPreview {
    /// Leading rows, all columns
    pub head: Table,
    pub columns: Vec<String>,
}

impl TableReport for SchemaPreviewer {
    type Output = SchemaPreview;

    fn id(&self) -> &str {
        "preview"
    }

    fn build(&self, table: &Table) -> Result<SchemaPreview> {
        let rows: Vec<usize> = (0..table.len().min(self.rows)).collect();
        let cols: Vec<usize> = (0..table.columns.len()).collect();

        Ok(SchemaPreview {
            head: table.select(&rows, &cols),
            columns: table.columns.clone(),
        })
    }
}

impl fmt::Display for SchemaPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index: Vec<usize> = (0..self.head.len()).collect();
        writeln!(f, "{}", render_table(&self.head, &index))?;
        writeln!(f)?;
        write!(f, "Columns: {}", render_column_list(&self.columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::CellValue;

    fn table_with_rows(n: i64) -> Table {
        let mut table = Table::new(vec!["proposal_no".into(), "Project Title".into()]);
        for i in 0..n {
            table.push_row(vec![CellValue::Int(i), CellValue::Text(format!("T{}", i))]);
        }
        table
    }

    #[test]
    fn test_preview_takes_first_rows() {
        let previewer = SchemaPreviewer::new(&ReportConfig::default());
        let preview = previewer.build(&table_with_rows(8)).unwrap();

        assert_eq!(preview.head.len(), 5);
        assert_eq!(preview.head.cell(4, 0), &CellValue::Int(4));
        assert_eq!(preview.columns, vec!["proposal_no", "Project Title"]);
    }

    #[test]
    fn test_preview_of_short_table() {
        let previewer = SchemaPreviewer::new(&ReportConfig::default());
        let preview = previewer.build(&table_with_rows(2)).unwrap();
        assert_eq!(preview.head.len(), 2);

        let expected = [
            "   proposal_no  Project Title",
            "0            0             T0",
            "1            1             T1",
            "",
            "Columns: ['proposal_no', 'Project Title']",
        ]
        .join("\n");
        assert_eq!(preview.to_string(), expected);
    }

    #[test]
    fn test_missing_file_prints_only_the_error() {
        let previewer = SchemaPreviewer::new(&ReportConfig::default());
        let output = previewer.preview_or_error("no/such/proposal_dataset.xlsx");

        assert!(output.contains("no/such/proposal_dataset.xlsx"));
        assert!(!output.contains("Columns:"));
        assert_eq!(output.lines().count(), 1);
    }
}
