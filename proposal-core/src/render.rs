//! Plain-text table rendering

use crate::reader::Table;

const COLUMN_GAP: &str = "  ";

/// Render a table with a leading index column.
///
/// `index` labels each row (usually its position in the source table). The
/// index column is left-aligned with a blank header; data columns are
/// right-aligned to the widest of their header and values.
pub fn render_table(table: &Table, index: &[usize]) -> String {
    let labels: Vec<String> = (0..table.len())
        .map(|r| index.get(r).copied().unwrap_or(r).to_string())
        .collect();
    let index_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let cells: Vec<Vec<String>> = (0..table.len())
        .map(|row| {
            (0..table.columns.len())
                .map(|col| table.cell(row, col).to_string())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(col, name)| {
            cells
                .iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(table.len() + 1);
    lines.push(render_line("", index_width, &table.columns, &widths));
    for (label, row) in labels.iter().zip(&cells) {
        lines.push(render_line(label, index_width, row, &widths));
    }
    lines.join("\n")
}

fn render_line(label: &str, index_width: usize, values: &[String], widths: &[usize]) -> String {
    let mut line = format!("{:<width$}", label, width = index_width);
    for (value, width) in values.iter().zip(widths) {
        line.push_str(COLUMN_GAP);
        line.push_str(&format!("{:>width$}", value, width = *width));
    }
    line
}

/// Render column names as a bracketed, quoted list: `['a', 'b']`
pub fn render_column_list(columns: &[String]) -> String {
    let quoted: Vec<String> = columns.iter().map(|c| format!("'{}'", c)).collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::CellValue;

    fn sample() -> Table {
        let mut table = Table::new(vec!["proposal_no".into(), "PI".into()]);
        table.push_row(vec![CellValue::Int(1), CellValue::Text("A".into())]);
        table.push_row(vec![CellValue::Int(12), CellValue::Text("Bob".into())]);
        table
    }

    #[test]
    fn test_render_aligns_columns() {
        let rendered = render_table(&sample(), &[0, 1]);
        let expected = [
            "   proposal_no   PI",
            "0            1    A",
            "1           12  Bob",
        ]
        .join("\n");
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_uses_given_index_labels() {
        let rendered = render_table(&sample(), &[7, 10]);
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[1].starts_with("7 "));
        assert!(lines[2].starts_with("10"));
    }

    #[test]
    fn test_render_pads_short_rows() {
        let mut table = Table::new(vec!["proposal_no".into(), "PI".into()]);
        table.rows.push(vec![CellValue::Int(3)]);

        let rendered = render_table(&table, &[0]);
        assert_eq!(rendered.lines().nth(1), Some("0            3  NaN"));
    }

    #[test]
    fn test_render_empty_table_prints_header_only() {
        let table = Table::new(vec!["proposal_no".into(), "PI".into()]);
        assert_eq!(render_table(&table, &[]), "  proposal_no  PI");
    }

    #[test]
    fn test_render_column_list() {
        let columns = vec!["proposal_no".to_string(), "Project Title".to_string()];
        assert_eq!(render_column_list(&columns), "['proposal_no', 'Project Title']");
        assert_eq!(render_column_list(&[]), "[]");
    }
}
