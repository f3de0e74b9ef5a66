use std::ops::RangeInclusive;

use tracing::{debug, trace};

use crate::config::FlowConfig;
use crate::error::{ConfigError, GridError};
use crate::grid::Grid;
use crate::stepper::FlowParams;

pub const VELOCITY_RANGE: RangeInclusive<f64> = 0.1..=2.0;
pub const DIFFUSION_RANGE: RangeInclusive<f64> = 0.01..=1.0;

/// State of one flow simulation driven by an external timer.
///
/// The host calls [`FlowSession::tick`] once per frame and changes the
/// parameters between ticks. A new session starts running.
#[derive(Debug, Clone)]
pub struct FlowSession {
    config: FlowConfig,
    initial: Grid,
    field: Grid,
    velocity: f64,
    diffusion_coefficient: f64,
    running: bool,
    frame: u64,
}

impl FlowSession {
    /// Session over the default slab initial condition.
    pub fn new(config: FlowConfig) -> Result<FlowSession, ConfigError> {
        config.validate()?;
        let initial = config.slab()?;
        FlowSession::with_initial(config, initial)
    }

    pub fn with_initial(config: FlowConfig, initial: Grid) -> Result<FlowSession, ConfigError> {
        config.validate()?;
        let expected = (config.num_points_y, config.num_points_x);
        if initial.shape() != expected {
            return Err(ConfigError::Invalid(format!(
                "initial field is {}x{}, config expects {}x{}",
                initial.rows(),
                initial.cols(),
                expected.0,
                expected.1
            )));
        }
        debug!(rows = expected.0, cols = expected.1, "flow session created");
        let mut session = FlowSession {
            velocity: config.velocity,
            diffusion_coefficient: config.diffusion_coefficient,
            field: initial.clone(),
            initial,
            config,
            running: true,
            frame: 0,
        };
        session.restore_configured_params();
        Ok(session)
    }

    // ---- Controls ----

    pub fn start(&mut self) {
        debug!(frame = self.frame, "start");
        self.running = true;
    }

    pub fn pause(&mut self) {
        debug!(frame = self.frame, "pause");
        self.running = false;
    }

    /// Restores the configured parameters (clamped like the setters) and the
    /// initial field, paused.
    pub fn reset(&mut self) {
        debug!(frame = self.frame, "reset");
        self.restore_configured_params();
        self.field = self.initial.clone();
        self.running = false;
        self.frame = 0;
    }

    pub fn set_velocity(&mut self, v: f64) {
        self.velocity = v.clamp(*VELOCITY_RANGE.start(), *VELOCITY_RANGE.end());
    }

    pub fn set_diffusion_coefficient(&mut self, d: f64) {
        self.diffusion_coefficient = d.clamp(*DIFFUSION_RANGE.start(), *DIFFUSION_RANGE.end());
    }

    fn restore_configured_params(&mut self) {
        self.set_velocity(self.config.velocity);
        self.set_diffusion_coefficient(self.config.diffusion_coefficient);
    }

    /// Replaces the field used by later ticks. The shape must not change.
    pub fn replace_field(&mut self, field: Grid) -> Result<(), GridError> {
        if field.shape() != self.field.shape() {
            return Err(GridError::ShapeMismatch {
                expected: self.field.shape(),
                got: field.shape(),
            });
        }
        self.field = field;
        Ok(())
    }

    // ---- Stepping ----

    /// Advances one predictor-corrector step when running. Returns whether a
    /// step was taken.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.field = self.params().predictor_corrector(&self.field);
        self.frame += 1;
        trace!(frame = self.frame, velocity = self.velocity, "tick");
        true
    }

    // ---- Accessors ----

    pub fn params(&self) -> FlowParams {
        FlowParams {
            velocity: self.velocity,
            diffusion_coefficient: self.diffusion_coefficient,
            dt: self.config.time_step,
            dx: self.config.dx(),
            dy: self.config.dy(),
        }
    }

    pub fn field(&self) -> &Grid {
        &self.field
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn diffusion_coefficient(&self) -> f64 {
        self.diffusion_coefficient
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}
