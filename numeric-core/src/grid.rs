use serde::Serialize;

use crate::error::GridError;

/// Row-major scalar field. `rows` runs along y, `cols` along x.
///
/// The shape is fixed at construction; updates produce a new grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Result<Grid, GridError> {
        Grid::filled(rows, cols, 0.0)
    }

    pub fn filled(rows: usize, cols: usize, value: f64) -> Result<Grid, GridError> {
        if rows < 3 || cols < 3 {
            return Err(GridError::TooSmall { rows, cols });
        }
        Ok(Grid {
            rows,
            cols,
            data: vec![value; rows * cols],
        })
    }

    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Result<Grid, GridError>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut grid = Grid::new(rows, cols)?;
        for i in 0..rows {
            for j in 0..cols {
                grid.data[i * cols + j] = f(i, j);
            }
        }
        Ok(grid)
    }

    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Grid, GridError> {
        let cols = rows.first().map_or(0, Vec::len);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(GridError::RaggedRow {
                    row,
                    expected: cols,
                    got: values.len(),
                });
            }
        }
        if rows.len() < 3 || cols < 3 {
            return Err(GridError::TooSmall {
                rows: rows.len(),
                cols,
            });
        }
        Ok(Grid {
            rows: rows.len(),
            cols,
            data: rows.concat(),
        })
    }

    /// Zero-valued grid of the same shape.
    pub fn zeros_like(&self) -> Grid {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: vec![0.0; self.data.len()],
        }
    }

    // ---- Accessors ----

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * self.cols + j] = value;
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn column(&self, j: usize) -> Vec<f64> {
        (0..self.rows).map(|i| self.get(i, j)).collect()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Sets every cell in `rows x cols` (half-open ranges) to `value`.
    pub fn fill_rect(
        &mut self,
        rows: std::ops::Range<usize>,
        cols: std::ops::Range<usize>,
        value: f64,
    ) {
        let rows = rows.start.min(self.rows)..rows.end.min(self.rows);
        let cols = cols.start.min(self.cols)..cols.end.min(self.cols);
        for i in rows {
            for j in cols.clone() {
                self.set(i, j, value);
            }
        }
    }

    // ---- Summaries ----

    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    pub fn is_uniform(&self) -> bool {
        let first = self.data[0];
        self.data.iter().all(|&v| v == first)
    }

    pub fn has_non_finite(&self) -> bool {
        self.data.iter().any(|v| !v.is_finite())
    }
}
