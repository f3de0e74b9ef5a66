//! Explicit advection-diffusion update on a [`Grid`].
//!
//! Interior cells use an upwind backward difference for advection and a
//! central second difference for diffusion:
//!
//! ```text
//! u'[i,j] = u[i,j] + dt * ( - v (u[i,j] - u[i,j-1]) / dx
//!                           - v (u[i,j] - u[i-1,j]) / dy
//!                           + D (u[i,j+1] - 2u[i,j] + u[i,j-1]) / dx^2
//!                           + D (u[i+1,j] - 2u[i,j] + u[i-1,j]) / dy^2 )
//! ```
//!
//! The outer ring is then copied from its interior neighbour (no-flux).
//! The scheme is only conditionally stable; unstable parameters diverge to
//! inf/NaN and that is passed through unchanged.

use serde::{Deserialize, Serialize};

use crate::grid::Grid;

/// Parameters for one stepper call, read fresh each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowParams {
    pub velocity: f64,
    pub diffusion_coefficient: f64,
    pub dt: f64,
    pub dx: f64,
    pub dy: f64,
}

impl FlowParams {
    pub fn advect_diffuse(&self, u: &Grid) -> Grid {
        advect_diffuse(u, self.velocity, self.diffusion_coefficient, self.dt, self.dx, self.dy)
    }

    pub fn predictor_corrector(&self, u: &Grid) -> Grid {
        predictor_corrector(u, self.velocity, self.diffusion_coefficient, self.dt, self.dx, self.dy)
    }
}

/// One explicit update. Returns a new grid of the same shape.
pub fn advect_diffuse(
    u: &Grid,
    velocity: f64,
    diffusion_coeff: f64,
    dt: f64,
    dx: f64,
    dy: f64,
) -> Grid {
    let (rows, cols) = u.shape();
    let src = u.as_slice();
    let mut next = u.zeros_like();
    let dx2 = dx * dx;
    let dy2 = dy * dy;

    for i in 1..(rows - 1) {
        let row = i * cols;
        for j in 1..(cols - 1) {
            let k = row + j;

            let c = src[k];
            let up = src[k - cols];
            let down = src[k + cols];
            let left = src[k - 1];
            let right = src[k + 1];

            let advective_flux_x = velocity * (c - left) / dx;
            let advective_flux_y = velocity * (c - up) / dy;
            let diffusive_flux_x = diffusion_coeff * (right - 2.0 * c + left) / dx2;
            let diffusive_flux_y = diffusion_coeff * (down - 2.0 * c + up) / dy2;

            next.set(
                i,
                j,
                c + dt * (-advective_flux_x - advective_flux_y + diffusive_flux_x + diffusive_flux_y),
            );
        }
    }

    apply_no_flux_boundary(&mut next);
    next
}

/// Predictor pass followed by a corrector pass on the predicted field.
pub fn predictor_corrector(
    u: &Grid,
    velocity: f64,
    diffusion_coeff: f64,
    dt: f64,
    dx: f64,
    dy: f64,
) -> Grid {
    let predicted = advect_diffuse(u, velocity, diffusion_coeff, dt, dx, dy);
    advect_diffuse(&predicted, velocity, diffusion_coeff, dt, dx, dy)
}

/// Zero-gradient edges: left and right columns first, then top and bottom
/// rows, so corners take the value of their diagonal interior neighbour.
pub fn apply_no_flux_boundary(u: &mut Grid) {
    let (rows, cols) = u.shape();
    for i in 0..rows {
        u.set(i, 0, u.get(i, 1));
        u.set(i, cols - 1, u.get(i, cols - 2));
    }
    for j in 0..cols {
        u.set(0, j, u.get(1, j));
        u.set(rows - 1, j, u.get(rows - 2, j));
    }
}
