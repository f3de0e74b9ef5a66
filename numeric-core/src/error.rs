use thiserror::Error;

/// Text input that could not be read as a number.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("invalid numeric value for {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// Failure to parse or evaluate a user expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("syntax error at position {position}: {message}")]
    Syntax { position: usize, message: String },
    #[error("unknown name '{0}'")]
    UnknownName(String),
    #[error("function '{func}' expects {expected} argument(s), got {got}")]
    WrongArity {
        func: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("math domain error in {func}({arg})")]
    Domain { func: &'static str, arg: f64 },
    #[error("numerical result out of range in {0}")]
    Overflow(&'static str),
}

/// Failure while producing an Euler trace.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StepError {
    #[error("step size must be positive and finite, got {0}")]
    InvalidStep(f64),
    #[error("x range from {x0} to {xn} does not give a finite step count")]
    UnboundedRange { x0: f64, xn: f64 },
    #[error("evaluation failed at step {step} (x = {x}, y = {y}): {source}")]
    Evaluation {
        step: usize,
        x: f64,
        y: f64,
        #[source]
        source: EvaluationError,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("grid must be at least 3x3, got {rows}x{cols}")]
    TooSmall { rows: usize, cols: usize },
    #[error("row {row} has {got} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },
    #[error("expected a {}x{} grid, got {}x{}", expected.0, expected.1, got.0, got.1)]
    ShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error(transparent)]
    Grid(#[from] GridError),
}
