use crate::error::{EvaluationError, ParseError, StepError};
use crate::expr::Expr;
use crate::ode::{self, EulerRow, EulerSteps};

/// Numeric inputs of the Euler view, read from free text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerInput {
    pub x0: f64,
    pub y0: f64,
    pub xn: f64,
    pub step: f64,
}

impl EulerInput {
    /// Parses all four fields before any computation; the first field that
    /// is not a number is reported.
    pub fn parse(x0: &str, y0: &str, xn: &str, step: &str) -> Result<EulerInput, ParseError> {
        Ok(EulerInput {
            x0: parse_number("x0", x0)?,
            y0: parse_number("y0", y0)?,
            xn: parse_number("xn", xn)?,
            step: parse_number("step", step)?,
        })
    }

    pub fn steps<'a>(
        &self,
        expr: &'a Expr,
    ) -> Result<EulerSteps<impl FnMut(f64, f64) -> Result<f64, EvaluationError> + 'a>, StepError> {
        EulerSteps::new(self.x0, self.y0, self.xn, self.step, move |x, y| expr.eval(x, y))
    }

    pub fn solve(&self, expr: &Expr) -> Result<Vec<EulerRow>, StepError> {
        ode::step_sequence(self.x0, self.y0, self.xn, self.step, |x, y| expr.eval(x, y))
    }
}

/// Accepts anything `f64::from_str` accepts after trimming surrounding
/// whitespace, including `inf` and `nan`.
pub fn parse_number(field: &'static str, text: &str) -> Result<f64, ParseError> {
    text.trim().parse().map_err(|_| ParseError::InvalidNumber {
        field,
        value: text.to_string(),
    })
}
