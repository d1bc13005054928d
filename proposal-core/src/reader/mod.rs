//! Spreadsheet loader using calamine

use crate::error::{Result, TableError};
use calamine::{Data, Reader, open_workbook_auto};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

pub mod table;

pub use table::{CellKey, CellValue, Table};

/// Read the first worksheet of a spreadsheet file into a table
///
/// The first non-empty row becomes the header; every later row that is not
/// entirely empty becomes a data row.
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path).map_err(|e| TableError::Open {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| TableError::NoWorksheet(path.to_path_buf()))?;
    debug!(path = %path.display(), sheet = %sheet_name, "reading worksheet");

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| TableError::Read {
            sheet: sheet_name.clone(),
            message: e.to_string(),
        })?;

    // The range starts at the first used cell; keep the blank columns before it
    let leading_cols = range.start().map_or(0, |(_, col)| col as usize);
    let table = build_table(range.rows().map(|row| {
        std::iter::repeat_n(CellValue::Empty, leading_cols)
            .chain(row.iter().map(parse_cell_value))
            .collect()
    }));
    info!(
        path = %path.display(),
        rows = table.len(),
        columns = table.columns.len(),
        "loaded table"
    );
    Ok(table)
}

/// Assemble a table from raw rows, applying header and column typing rules
pub fn build_table<I>(rows: I) -> Table
where
    I: IntoIterator<Item = Vec<CellValue>>,
{
    let mut rows = rows
        .into_iter()
        .filter(|row| row.iter().any(|c| !c.is_empty()));

    let Some(header) = rows.next() else {
        return Table::default();
    };

    let names = header
        .iter()
        .enumerate()
        .map(|(i, cell)| header_name(i, cell))
        .collect();
    let mut table = Table::new(dedupe_headers(names));
    for row in rows {
        table.push_row(row);
    }

    widen_float_columns(&mut table);
    table
}

fn parse_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => number_value(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => CellValue::Empty,
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) if dt.is_datetime() => CellValue::DateTime(value),
            _ => number_value(dt.as_f64()),
        },
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

/// Integral floats within the i64 range are stored as integers
fn number_value(v: f64) -> CellValue {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e15 {
        CellValue::Int(v as i64)
    } else {
        CellValue::Float(v)
    }
}

fn header_name(index: usize, cell: &CellValue) -> String {
    match cell {
        CellValue::Empty => format!("Unnamed: {}", index),
        CellValue::Text(s) if s.trim().is_empty() => format!("Unnamed: {}", index),
        other => other.to_string(),
    }
}

/// Disambiguate repeated header names: `x`, `x.1`, `x.2`, ...
fn dedupe_headers(names: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(names.len());

    for name in names {
        let mut name = name;
        let mut seen = counts.get(&name).copied().unwrap_or(0);
        while seen > 0 {
            counts.insert(name.clone(), seen + 1);
            name = format!("{}.{}", name, seen);
            seen = counts.get(&name).copied().unwrap_or(0);
        }
        counts.insert(name.clone(), seen + 1);
        out.push(name);
    }

    out
}

/// A numeric column with gaps or with any fractional value holds floats,
/// so its integers are widened
fn widen_float_columns(table: &mut Table) {
    for col in 0..table.columns.len() {
        let mut has_empty = false;
        let mut has_float = false;
        let mut all_numeric = true;
        for cell in table.column(col) {
            match cell {
                CellValue::Empty => has_empty = true,
                CellValue::Float(_) => has_float = true,
                CellValue::Int(_) => {}
                _ => {
                    all_numeric = false;
                    break;
                }
            }
        }

        if !(all_numeric && (has_empty || has_float)) {
            continue;
        }

        debug!(column = %table.columns[col], "widening numeric column to float");
        for cell in table.rows.iter_mut().filter_map(|row| row.get_mut(col)) {
            if let CellValue::Int(i) = *cell {
                *cell = CellValue::Float(i as f64);
            }
        }
    }
}
