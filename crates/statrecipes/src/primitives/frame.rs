//! Columnar data frame exchanged between the host framework and transforms.
//!
//! ## Purpose
//!
//! This module provides a small, ordered, named-column table. Stats receive a
//! frame of observations (plus any grouping columns) and return a fresh frame
//! of results; moves return a frame of the same shape.
//!
//! ## Design notes
//!
//! * **Ordered**: Column order is preserved; positional lookups are meaningful.
//! * **Missing values**: Numeric missing values are represented as NaN.
//! * **Immutable results**: Transforms never mutate their input frame.
//!
//! ## Invariants
//!
//! * Every column has exactly `n_rows()` entries.
//! * Column names are unique.
//!
//! ## Non-goals
//!
//! * This module does not provide joins, pivots or lazy evaluation.
//! * This module does not parse files.

// External dependencies
use core::fmt::{Display, Formatter, Result as FmtResult};
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::primitives::errors::StatError;

// ============================================================================
// Column
// ============================================================================

/// A single column of a [`Frame`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Column {
    /// Floating point values; NaN marks a missing value.
    Numeric(Vec<f64>),

    /// Text values, typically grouping keys.
    Categorical(Vec<String>),
}

impl Column {
    /// Number of entries in the column.
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(v) => v.len(),
            Self::Categorical(v) => v.len(),
        }
    }

    /// Check if the column has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the values of a numeric column.
    pub fn as_numeric(&self) -> Option<&[f64]> {
        match self {
            Self::Numeric(v) => Some(v),
            Self::Categorical(_) => None,
        }
    }

    /// Grouping key of the entry at `row`.
    pub fn key_at(&self, row: usize) -> KeyValue {
        match self {
            Self::Numeric(v) => KeyValue::number(v[row]),
            Self::Categorical(v) => KeyValue::Text(v[row].clone()),
        }
    }

    /// Gather the entries at `rows`, in order.
    pub fn take(&self, rows: &[usize]) -> Self {
        match self {
            Self::Numeric(v) => Self::Numeric(rows.iter().map(|&i| v[i]).collect()),
            Self::Categorical(v) => Self::Categorical(rows.iter().map(|&i| v[i].clone()).collect()),
        }
    }

    /// A column holding `value` repeated `n` times.
    pub fn repeat(value: &KeyValue, n: usize) -> Self {
        match value {
            KeyValue::Number(bits) => Self::Numeric(vec![f64::from_bits(*bits); n]),
            KeyValue::Text(s) => Self::Categorical(vec![s.clone(); n]),
        }
    }

    fn extend_from(&mut self, other: &Column, name: &str) -> Result<(), StatError> {
        match (self, other) {
            (Self::Numeric(a), Self::Numeric(b)) => a.extend_from_slice(b),
            (Self::Categorical(a), Self::Categorical(b)) => a.extend(b.iter().cloned()),
            _ => return Err(StatError::NotNumeric(name.to_string())),
        }
        Ok(())
    }
}

impl From<Vec<f64>> for Column {
    fn from(v: Vec<f64>) -> Self {
        Self::Numeric(v)
    }
}

impl From<Vec<String>> for Column {
    fn from(v: Vec<String>) -> Self {
        Self::Categorical(v)
    }
}

impl From<Vec<&str>> for Column {
    fn from(v: Vec<&str>) -> Self {
        Self::Categorical(v.into_iter().map(String::from).collect())
    }
}

// ============================================================================
// Key Value
// ============================================================================

/// Hashable value of a grouping column at one row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyValue {
    /// Bit pattern of a numeric key (negative zero folded into zero).
    Number(u64),

    /// Text key.
    Text(String),
}

impl KeyValue {
    /// Build a numeric key.
    pub fn number(v: f64) -> Self {
        let v = if v == 0.0 { 0.0 } else { v };
        Self::Number(v.to_bits())
    }
}

impl Display for KeyValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Number(bits) => write!(f, "{}", f64::from_bits(*bits)),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

// ============================================================================
// Frame
// ============================================================================

/// Ordered collection of equally long, uniquely named columns.
///
/// Deserialization checks the invariants, so a malformed host payload is
/// rejected with a [`StatError`] instead of reaching a transform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFrame")]
pub struct Frame {
    names: Vec<String>,
    columns: Vec<Column>,
}

impl Frame {
    /// Create an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a column, consuming and returning the frame.
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        column: impl Into<Column>,
    ) -> Result<Self, StatError> {
        self.insert(name, column)?;
        Ok(self)
    }

    /// Add (or replace) a column in place.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        column: impl Into<Column>,
    ) -> Result<(), StatError> {
        let name = name.into();
        let column = column.into();

        let replacing = self.position(&name);
        let others = self.columns.len() - usize::from(replacing.is_some());
        if others > 0 {
            let expected = match replacing {
                Some(0) => self.columns[1].len(),
                _ => self.columns[0].len(),
            };
            if column.len() != expected {
                return Err(StatError::LengthMismatch {
                    column: name,
                    expected,
                    got: column.len(),
                });
            }
        }

        match replacing {
            Some(idx) => self.columns[idx] = column,
            None => {
                self.names.push(name);
                self.columns.push(column);
            }
        }
        Ok(())
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Check if the frame has no rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    /// Column names in order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Check if a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.position(name).map(|i| &self.columns[i])
    }

    /// Borrow a numeric column by name.
    pub fn numeric(&self, name: &str) -> Result<&[f64], StatError> {
        match self.column(name) {
            Some(col) => col
                .as_numeric()
                .ok_or_else(|| StatError::NotNumeric(name.to_string())),
            None => Err(StatError::MissingColumn(name.to_string())),
        }
    }

    /// Names of the numeric columns, in order.
    pub fn numeric_names(&self) -> Vec<&str> {
        self.names
            .iter()
            .zip(&self.columns)
            .filter(|(_, c)| c.as_numeric().is_some())
            .map(|(n, _)| n.as_str())
            .collect()
    }

    /// Gather the given rows into a new frame with the same schema.
    pub fn take_rows(&self, rows: &[usize]) -> Self {
        Self {
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.take(rows)).collect(),
        }
    }

    /// Rename columns according to `(from, to)` pairs.
    pub fn rename(&self, mapping: &[(&str, &str)]) -> Self {
        let names = self
            .names
            .iter()
            .map(|n| {
                mapping
                    .iter()
                    .find(|(from, _)| from == n)
                    .map_or_else(|| n.clone(), |(_, to)| to.to_string())
            })
            .collect();
        Self {
            names,
            columns: self.columns.clone(),
        }
    }

    /// Stack frames vertically.
    ///
    /// Frames without rows are skipped; all others must share the schema of
    /// the first one. If every frame is empty, the first frame's schema is
    /// kept.
    pub fn concat(frames: &[Frame]) -> Result<Self, StatError> {
        let mut iter = frames.iter().filter(|f| f.n_rows() > 0);
        let mut out = match iter.next() {
            Some(first) => first.clone(),
            None => {
                return Ok(frames
                    .iter()
                    .find(|f| f.n_cols() > 0)
                    .cloned()
                    .unwrap_or_default());
            }
        };

        for frame in iter {
            for (name, col) in out.names.iter().zip(out.columns.iter_mut()) {
                let other = frame
                    .column(name)
                    .ok_or_else(|| StatError::MissingColumn(name.clone()))?;
                col.extend_from(other, name)?;
            }
        }
        Ok(out)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

// ============================================================================
// Deserialization
// ============================================================================

/// Unchecked wire form of a [`Frame`].
#[derive(Deserialize)]
struct RawFrame {
    names: Vec<String>,
    columns: Vec<Column>,
}

impl TryFrom<RawFrame> for Frame {
    type Error = StatError;

    fn try_from(raw: RawFrame) -> Result<Self, Self::Error> {
        if raw.names.len() != raw.columns.len() {
            return Err(StatError::LengthMismatch {
                column: "names".to_string(),
                expected: raw.columns.len(),
                got: raw.names.len(),
            });
        }

        let mut frame = Frame::new();
        for (name, column) in raw.names.into_iter().zip(raw.columns) {
            if frame.has_column(&name) {
                return Err(StatError::DuplicateColumn(name));
            }
            frame.insert(name, column)?;
        }
        Ok(frame)
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for Frame {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "Frame: {} rows x {} columns", self.n_rows(), self.n_cols())?;

        for name in &self.names {
            write!(f, " {:>12}", name)?;
        }
        writeln!(f)?;
        writeln!(f, "{:-<width$}", "", width = 13 * self.n_cols())?;

        // Data rows (show first 10 and last 10 if more than 20 rows)
        let n = self.n_rows();
        let rows_to_show: Vec<usize> = if n <= 20 {
            (0..n).collect()
        } else {
            (0..10).chain(n - 10..n).collect()
        };

        let mut prev_idx = 0;
        for (i, &idx) in rows_to_show.iter().enumerate() {
            if i > 0 && idx != prev_idx + 1 {
                writeln!(f, " {:>12}", "...")?;
            }
            prev_idx = idx;

            for col in &self.columns {
                match col {
                    Column::Numeric(v) => write!(f, " {:>12.6}", v[idx])?,
                    Column::Categorical(v) => write!(f, " {:>12}", v[idx])?,
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
