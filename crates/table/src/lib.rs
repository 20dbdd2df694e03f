//! Flattened-table loading and tolerance comparison.
//!
//! Two tables produced from independent runs of the same seed should agree
//! up to floating-point noise. The comparator rounds every numeric cell to a
//! caller-chosen number of decimal places and counts the rows that still
//! differ; zero differing rows means tolerance-equality.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("{path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("column names differ: {left:?} vs {right:?}")]
    HeaderMismatch {
        left: Vec<String>,
        right: Vec<String>,
    },
}

/// One parsed cell. Numeric-looking fields compare under rounding,
/// everything else compares literally.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    fn parse(field: &str) -> Cell {
        match field.trim().parse::<f64>() {
            Ok(value) => Cell::Number(value),
            Err(_) => Cell::Text(field.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn from_path(path: &Path) -> Result<Self, TableError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|source| TableError::csv(path, source))?;
        let headers = reader
            .headers()
            .map_err(|source| TableError::csv(path, source))?
            .iter()
            .map(str::to_string)
            .collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|source| TableError::csv(path, source))?;
            rows.push(record.iter().map(Cell::parse).collect());
        }
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// (data rows, columns); the header row is not counted.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.headers.len())
    }
}

impl TableError {
    fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompareOutcome {
    /// Both arguments name the same file; nothing was read. Distinct from a
    /// verified zero-diff comparison.
    SamePath,
    /// Row/column shapes differ; never reported as a diff count.
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    /// Number of rows with at least one column differing after rounding.
    /// Zero means the tables are tolerance-equal.
    DiffRows(usize),
}

/// Compare two flattened tables under `decimals`-place rounding.
pub fn compare_tables(
    left: &Path,
    right: &Path,
    decimals: u32,
) -> Result<CompareOutcome, TableError> {
    if left == right {
        return Ok(CompareOutcome::SamePath);
    }

    let a = Table::from_path(left)?;
    let b = Table::from_path(right)?;

    if a.shape() != b.shape() {
        return Ok(CompareOutcome::ShapeMismatch {
            left: a.shape(),
            right: b.shape(),
        });
    }
    if a.headers != b.headers {
        return Err(TableError::HeaderMismatch {
            left: a.headers,
            right: b.headers,
        });
    }

    let differing = a
        .rows
        .iter()
        .zip(&b.rows)
        .filter(|(x, y)| row_differs(x, y, decimals))
        .count();
    Ok(CompareOutcome::DiffRows(differing))
}

fn row_differs(left: &[Cell], right: &[Cell], decimals: u32) -> bool {
    left.len() != right.len()
        || left
            .iter()
            .zip(right)
            .any(|(a, b)| !cells_equal(a, b, decimals))
}

fn cells_equal(a: &Cell, b: &Cell, decimals: u32) -> bool {
    match (a, b) {
        (Cell::Number(x), Cell::Number(y)) => round_to(*x, decimals) == round_to(*y, decimals),
        (Cell::Text(x), Cell::Text(y)) => x == y,
        _ => false,
    }
}

// Half-to-even, matching the rounding applied by the numeric tooling the
// tables are analyzed with downstream.
fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round_ties_even() / scale
}
