//! Numerical kernels behind the Euler table and the pipe-flow heatmap.
//!
//! Both are pure stepping functions; hosts own the timer, the controls and
//! the rendering.

pub mod config;
pub mod error;
pub mod expr;
pub mod grid;
pub mod input;
pub mod ode;
pub mod session;
pub mod stepper;

pub use config::FlowConfig;
pub use error::{ConfigError, EvaluationError, GridError, ParseError, StepError};
pub use expr::Expr;
pub use grid::Grid;
pub use input::EulerInput;
pub use ode::{EulerRow, EulerSteps, step_count, step_sequence};
pub use session::FlowSession;
pub use stepper::{FlowParams, advect_diffuse, apply_no_flux_boundary, predictor_corrector};
