//! Element count maps
//!
//! An [ElementMap] is the 2D grid of detector counts of a single element (or channel)
//! as exported by the instrument: one line per scan row, whitespace separated counts.

use itertools::{Itertools, MinMaxResult};
use nalgebra::DMatrix;
use std::{fmt, fs, path::Path};

#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("failed to read the map file")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {token:?} is not a number")]
    Parse {
        line: usize,
        token: String,
        #[source]
        source: std::num::ParseFloatError,
    },
    #[error("line {line}: expected {expected} values, found {found}")]
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("the map is empty")]
    Empty,
}
type Result<T> = std::result::Result<T, GridError>;

/// Element count map
#[derive(Debug, Clone, PartialEq)]
pub struct ElementMap {
    label: String,
    counts: DMatrix<f64>,
}
impl ElementMap {
    /// Creates a new element map from a count matrix
    pub fn new<S: Into<String>>(label: S, counts: DMatrix<f64>) -> Self {
        Self {
            label: label.into(),
            counts,
        }
    }
    /// Creates a new element map from row-major counts
    ///
    /// Panics if `counts.len() != rows * cols`
    pub fn from_row_slice<S: Into<String>>(
        label: S,
        rows: usize,
        cols: usize,
        counts: &[f64],
    ) -> Self {
        Self::new(label, DMatrix::from_row_slice(rows, cols, counts))
    }
    /// Parses the counts from the text export of a map
    pub fn parse<S: Into<String>>(label: S, contents: &str) -> Result<Self> {
        let mut rows: Vec<Vec<f64>> = vec![];
        for (k, line) in contents.lines().enumerate() {
            let line_number = k + 1;
            let data = line.split('#').next().unwrap_or_default();
            let row = data
                .split_whitespace()
                .map(|token| {
                    token.parse::<f64>().map_err(|source| GridError::Parse {
                        line: line_number,
                        token: token.to_string(),
                        source,
                    })
                })
                .collect::<Result<Vec<f64>>>()?;
            if row.is_empty() {
                continue;
            }
            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(GridError::Ragged {
                        line: line_number,
                        expected: first.len(),
                        found: row.len(),
                    });
                }
            }
            rows.push(row);
        }
        let n_cols = rows.first().map(|row| row.len()).ok_or(GridError::Empty)?;
        let n_rows = rows.len();
        let counts: Vec<f64> = rows.into_iter().flatten().collect();
        Ok(Self::from_row_slice(label, n_rows, n_cols, &counts))
    }
    /// Loads the counts from a map text file
    pub fn from_path<S: Into<String>, P: AsRef<Path>>(label: S, path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(label, &contents)
    }
    /// Returns the element label
    pub fn label(&self) -> &str {
        &self.label
    }
    /// Returns the count matrix
    pub fn counts(&self) -> &DMatrix<f64> {
        &self.counts
    }
    /// Returns the map shape as (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        self.counts.shape()
    }
    /// Returns the counts rotated by 90 degrees clockwise
    ///
    /// A map of shape (H,W) becomes a (W,H) matrix with `out[(i,j)] = in[(H-1-j,i)]`
    pub fn rotate_clockwise(&self) -> DMatrix<f64> {
        let (h, w) = self.shape();
        DMatrix::from_fn(w, h, |i, j| self.counts[(h - 1 - j, i)])
    }
    /// Returns the (min,max) of the finite counts
    pub fn data_range(&self) -> Option<(f64, f64)> {
        match self.counts.iter().copied().filter(|x| x.is_finite()).minmax() {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(x) => Some((x, x)),
            MinMaxResult::MinMax(min, max) => Some((min, max)),
        }
    }
}
impl fmt::Display for ElementMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.shape();
        write!(f, "{:>4}: {}x{}", self.label, rows, cols)?;
        if let Some((min, max)) = self.data_range() {
            write!(f, " [{min}, {max}] counts")?;
        }
        Ok(())
    }
}
