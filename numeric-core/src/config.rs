use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::Grid;
use crate::stepper::FlowParams;

/// Domain, resolution and default parameters of the flow simulation.
///
/// Every field has a default, so a config file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlowConfig {
    pub length: f64,
    pub width: f64,
    pub num_points_x: usize,
    pub num_points_y: usize,
    pub velocity: f64,
    pub diffusion_coefficient: f64,
    pub time_step: f64,
    pub num_frames: usize,
}

impl Default for FlowConfig {
    fn default() -> Self {
        FlowConfig {
            length: 20.0,
            width: 10.0,
            num_points_x: 100,
            num_points_y: 50,
            velocity: 1.0,
            diffusion_coefficient: 0.1,
            time_step: 0.01,
            num_frames: 2000,
        }
    }
}

impl FlowConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<FlowConfig, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: FlowConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_points_x < 3 || self.num_points_y < 3 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 3x3 points, got {}x{}",
                self.num_points_x, self.num_points_y
            )));
        }
        for (name, v) in [
            ("length", self.length),
            ("width", self.width),
            ("time_step", self.time_step),
        ] {
            if !(v > 0.0 && v.is_finite()) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {v}")));
            }
        }
        for (name, v) in [
            ("velocity", self.velocity),
            ("diffusion_coefficient", self.diffusion_coefficient),
        ] {
            if !v.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite, got {v}")));
            }
        }
        Ok(())
    }

    pub fn dx(&self) -> f64 {
        self.length / self.num_points_x as f64
    }

    pub fn dy(&self) -> f64 {
        self.width / self.num_points_y as f64
    }

    pub fn params(&self) -> FlowParams {
        FlowParams {
            velocity: self.velocity,
            diffusion_coefficient: self.diffusion_coefficient,
            dt: self.time_step,
            dx: self.dx(),
            dy: self.dy(),
        }
    }

    /// Zero field with a block of 1.0 over rows `ny/4..ny/2` and columns
    /// `nx/4..nx/2`.
    pub fn slab(&self) -> Result<Grid, ConfigError> {
        let (ny, nx) = (self.num_points_y, self.num_points_x);
        let mut grid = Grid::new(ny, nx)?;
        grid.fill_rect(ny / 4..ny / 2, nx / 4..nx / 2, 1.0);
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_pipe_setup() {
        let c = FlowConfig::default();
        assert_eq!(c.dx(), 0.2);
        assert_eq!(c.dy(), 0.2);
        let p = c.params();
        assert_eq!(p.velocity, 1.0);
        assert_eq!(p.diffusion_coefficient, 0.1);
        assert_eq!(p.dt, 0.01);
    }

    #[test]
    fn slab_covers_quarter_to_half() {
        let g = FlowConfig::default().slab().unwrap();
        assert_eq!(g.shape(), (50, 100));
        assert_eq!(g.sum(), (25 - 12) as f64 * (50 - 25) as f64);
        assert_eq!(g.get(12, 25), 1.0);
        assert_eq!(g.get(24, 49), 1.0);
        assert_eq!(g.get(25, 49), 0.0);
        assert_eq!(g.get(12, 50), 0.0);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let c: FlowConfig = serde_json::from_str(r#"{ "velocity": 0.5, "num_points_x": 40 }"#).unwrap();
        assert_eq!(c.velocity, 0.5);
        assert_eq!(c.num_points_x, 40);
        assert_eq!(c.num_points_y, 50);
        assert_eq!(c.dx(), 0.5);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_json::from_str::<FlowConfig>(r#"{ "velocty": 0.5 }"#).is_err());
    }

    #[test]
    fn validate_rejects_degenerate_domains() {
        let c = FlowConfig { num_points_y: 2, ..FlowConfig::default() };
        assert!(matches!(c.validate(), Err(ConfigError::Invalid(_))));
        let c = FlowConfig { time_step: 0.0, ..FlowConfig::default() };
        assert!(matches!(c.validate(), Err(ConfigError::Invalid(_))));
        let c = FlowConfig { velocity: f64::NAN, ..FlowConfig::default() };
        assert!(matches!(c.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn from_path_reads_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("flow.json");
        fs::write(&path, r#"{ "diffusion_coefficient": 0.3 }"#).unwrap();
        let c = FlowConfig::from_path(&path).unwrap();
        assert_eq!(c.diffusion_coefficient, 0.3);
        assert!(matches!(
            FlowConfig::from_path(temp_dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
