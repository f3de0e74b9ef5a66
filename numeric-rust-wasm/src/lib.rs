use numeric_core::{EulerInput, Expr, FlowConfig, FlowSession, StepError};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct FlowSim {
    inner: FlowSession,
}

#[wasm_bindgen]
impl FlowSim {
    /// Pipe flow with the default domain and slab initial condition.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<FlowSim, JsValue> {
        let inner = FlowSession::new(FlowConfig::default()).map_err(to_js)?;
        Ok(FlowSim { inner })
    }

    /// Same as `new`, with settings from a JSON object string.
    pub fn with_config_json(json: &str) -> Result<FlowSim, JsValue> {
        let inner = session_from_json(json).map_err(|e| JsValue::from_str(&e))?;
        Ok(FlowSim { inner })
    }

    // Controls
    pub fn start(&mut self) { self.inner.start(); }
    pub fn pause(&mut self) { self.inner.pause(); }
    pub fn reset(&mut self) { self.inner.reset(); }

    pub fn set_velocity(&mut self, v: f64) { self.inner.set_velocity(v); }
    pub fn set_diffusion_coefficient(&mut self, d: f64) { self.inner.set_diffusion_coefficient(d); }

    pub fn velocity(&self) -> f64 { self.inner.velocity() }
    pub fn diffusion_coefficient(&self) -> f64 { self.inner.diffusion_coefficient() }
    pub fn is_running(&self) -> bool { self.inner.is_running() }

    pub fn rows(&self) -> usize { self.inner.field().rows() }
    pub fn cols(&self) -> usize { self.inner.field().cols() }

    // Copy-based JS access, row-major
    pub fn get_field(&self) -> Vec<f64> {
        self.inner.field().as_slice().to_vec()
    }

    // Step + timing (WASM-only)
    pub fn tick(&mut self) -> StepInfo {
        let t0 = now_ms();
        let stepped = self.inner.tick();
        let t1 = now_ms();
        StepInfo { stepped, frame: self.inner.frame(), compute_ms: t1 - t0 }
    }
}

#[wasm_bindgen]
pub struct StepInfo {
    stepped: bool,
    frame: u64,
    compute_ms: f64,
}

#[wasm_bindgen]
impl StepInfo {
    pub fn stepped(&self) -> bool { self.stepped }
    pub fn frame(&self) -> u64 { self.frame }
    pub fn compute_ms(&self) -> f64 { self.compute_ms }
}

/// Euler trace for the text fields of the equation view, flattened as
/// `[x, y, slope, yn, x, y, ...]`.
#[wasm_bindgen]
pub fn euler_trace(equation: &str, x0: &str, y0: &str, xn: &str, step: &str) -> Result<Vec<f64>, JsValue> {
    let rows = solve_euler(equation, x0, y0, xn, step)?;
    Ok(rows.iter().flat_map(|r| [r.x, r.y, r.slope, r.y_next]).collect())
}

fn session_from_json(json: &str) -> Result<FlowSession, String> {
    let config: FlowConfig = serde_json::from_str(json).map_err(|e| format!("Invalid config JSON: {e}"))?;
    FlowSession::new(config).map_err(|e| e.to_string())
}

fn solve_euler(
    equation: &str,
    x0: &str,
    y0: &str,
    xn: &str,
    step: &str,
) -> Result<Vec<numeric_core::EulerRow>, String> {
    let input = EulerInput::parse(x0, y0, xn, step).map_err(|e| format!("Invalid input: {e}"))?;
    let expr = Expr::parse(equation).map_err(|e| format!("Invalid equation: {e}"))?;
    input.solve(&expr).map_err(|e: StepError| e.to_string())
}

fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
