//! Proposal table data structures

use crate::error::{Result, TableError};
use chrono::{NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

static EMPTY: CellValue = CellValue::Empty;

/// In-memory table loaded from the first worksheet of a spreadsheet
#[derive(Debug, Clone, Default, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating it to the column count
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Empty);
        self.rows.push(row);
    }

    /// Number of data rows (header excluded)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Like `column_index`, but a missing column is an error
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    /// Get the cell at the given position, `Empty` when out of bounds
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    /// Get cells in a specific column, in row order
    pub fn column(&self, col: usize) -> impl Iterator<Item = &CellValue> {
        self.rows.iter().map(move |r| r.get(col).unwrap_or(&EMPTY))
    }

    /// Build a table holding only the given rows and columns, in the given order
    pub fn select(&self, rows: &[usize], cols: &[usize]) -> Table {
        let columns = cols.iter().map(|&c| self.columns[c].clone()).collect();
        let mut out = Table::new(columns);
        for &r in rows {
            out.push_row(cols.iter().map(|&c| self.cell(r, c).clone()).collect());
        }
        out
    }
}

/// Cell value types
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    DateTime(NaiveDateTime),
    Error(String),
}

impl CellValue {
    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Numeric value for `Int` and `Float` cells
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Text this cell contributes to a full-row search; empty cells contribute nothing
    pub fn search_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            other => other.to_string(),
        }
    }

    /// Hashable identity used for grouping equal values
    pub fn key(&self) -> CellKey {
        match self {
            CellValue::Empty => CellKey::Empty,
            CellValue::Int(_) | CellValue::Float(_) => {
                let v = self.as_f64().unwrap_or_default();
                // -0.0 and 0.0 compare equal, so they must hash the same
                let v = if v == 0.0 { 0.0 } else { v };
                CellKey::Number(v.to_bits())
            }
            CellValue::Text(s) => CellKey::Text(s.clone()),
            CellValue::Bool(b) => CellKey::Bool(*b),
            CellValue::DateTime(dt) => CellKey::DateTime(*dt),
            CellValue::Error(e) => CellKey::Error(e.clone()),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            CellValue::Int(_) | CellValue::Float(_) => 0,
            CellValue::DateTime(_) => 1,
            CellValue::Bool(_) => 2,
            CellValue::Text(_) => 3,
            CellValue::Error(_) => 4,
            CellValue::Empty => 5,
        }
    }

    /// Ascending sort order: numbers, dates, booleans, text, errors, then empty cells last
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::DateTime(a), CellValue::DateTime(b)) => a.cmp(b),
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Error(a), CellValue::Error(b)) => a.cmp(b),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => self.kind_rank().cmp(&other.kind_rank()),
            },
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => write!(f, "NaN"),
            CellValue::Int(i) => write!(f, "{}", i),
            // Debug keeps the trailing ".0" on integral floats
            CellValue::Float(v) => write!(f, "{:?}", v),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Bool(true) => write!(f, "True"),
            CellValue::Bool(false) => write!(f, "False"),
            // Whole days print without a time part
            CellValue::DateTime(dt) if dt.time() == NaiveTime::MIN => {
                write!(f, "{}", dt.format("%Y-%m-%d"))
            }
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Error(e) => write!(f, "{}", e),
        }
    }
}

/// Grouping key for cell values; `1` and `1.0` map to the same key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellKey {
    Empty,
    Number(u64),
    Bool(bool),
    DateTime(NaiveDateTime),
    Text(String),
    Error(String),
}
