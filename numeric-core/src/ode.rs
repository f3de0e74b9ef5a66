//! Forward Euler stepping for `dy/dx = f(x, y)`.
//!
//! ```text
//! slope_i  = f(x_i, y_i)
//! y_{i+1}  = y_i + h * slope_i
//! x_{i+1}  = x_i + h
//! ```
//!
//! The trace holds one row per step and a final diagnostic row with the slope
//! at `xn`. That row reuses the last computed `y` as both current and next
//! value, which is only the true value at `xn` when `xn - x0` is a multiple
//! of `h`.

use serde::Serialize;
use tracing::debug;

use crate::error::{EvaluationError, StepError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EulerRow {
    pub x: f64,
    pub y: f64,
    pub slope: f64,
    pub y_next: f64,
}

/// Number of Euler steps between `x0` and `xn`: `floor((xn - x0) / h)`,
/// zero when `xn` lies before `x0`. Non-finite bounds, or a quotient too
/// large to count, are `StepError::UnboundedRange`.
pub fn step_count(x0: f64, xn: f64, h: f64) -> Result<usize, StepError> {
    if !(h > 0.0 && h.is_finite()) {
        return Err(StepError::InvalidStep(h));
    }
    let n = ((xn - x0) / h).trunc();
    if !(x0.is_finite() && xn.is_finite() && n.is_finite()) || n >= usize::MAX as f64 {
        return Err(StepError::UnboundedRange { x0, xn });
    }
    if n <= 0.0 {
        return Ok(0);
    }
    Ok(n as usize)
}

/// Row-by-row Euler trace. Yields `n` step rows, then the final row at `xn`,
/// and ends after the first error.
pub struct EulerSteps<F> {
    f: F,
    x: f64,
    y: f64,
    xn: f64,
    h: f64,
    steps: usize,
    index: usize,
    done: bool,
}

impl<F> EulerSteps<F>
where
    F: FnMut(f64, f64) -> Result<f64, EvaluationError>,
{
    pub fn new(x0: f64, y0: f64, xn: f64, h: f64, f: F) -> Result<Self, StepError> {
        let steps = step_count(x0, xn, h)?;
        debug!(x0, y0, xn, h, steps, "euler trace");
        Ok(EulerSteps {
            f,
            x: x0,
            y: y0,
            xn,
            h,
            steps,
            index: 0,
            done: false,
        })
    }

    /// Total rows the trace yields when no evaluation fails.
    pub fn row_count(&self) -> usize {
        self.steps + 1
    }

    fn eval(&mut self, x: f64, y: f64) -> Result<f64, StepError> {
        (self.f)(x, y).map_err(|source| StepError::Evaluation {
            step: self.index,
            x,
            y,
            source,
        })
    }
}

impl<F> Iterator for EulerSteps<F>
where
    F: FnMut(f64, f64) -> Result<f64, EvaluationError>,
{
    type Item = Result<EulerRow, StepError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if self.index < self.steps {
            let (x, y) = (self.x, self.y);
            let slope = match self.eval(x, y) {
                Ok(s) => s,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };
            let y_next = y + self.h * slope;
            self.y = y_next;
            self.x += self.h;
            self.index += 1;
            return Some(Ok(EulerRow {
                x,
                y,
                slope,
                y_next,
            }));
        }

        self.done = true;
        let (xn, y) = (self.xn, self.y);
        Some(self.eval(xn, y).map(|slope| EulerRow {
            x: xn,
            y,
            slope,
            y_next: y,
        }))
    }
}

/// Full Euler trace from `x0` to `xn` with step `h`, `n + 1` rows.
pub fn step_sequence<F>(x0: f64, y0: f64, xn: f64, h: f64, f: F) -> Result<Vec<EulerRow>, StepError>
where
    F: FnMut(f64, f64) -> Result<f64, EvaluationError>,
{
    EulerSteps::new(x0, y0, xn, h, f)?.collect()
}
