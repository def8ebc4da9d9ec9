//! Stateless entry points for diagnostics and tests on the JavaScript side.

use crate::frequency_count;
use js_sys::Float64Array;
use num_complex::Complex;
use optau_core::amplification::{
    amplification as core_amplification, amplification_optimal as core_amplification_optimal,
};
use optau_core::axis::compute_axis_scale;
use optau_core::geometry::{angular_frequency, compute_frequency_circles, compute_main_circle};
use optau_core::number::Number;
use optau_core::solver::compute_optimal_tau;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

fn tau_from_parts(re: f64, im: f64) -> Number {
    Number::from(Complex::new(re, im))
}

fn serialize<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    to_value(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Optimal tau for the band `[fmin, fmax]`, as `[re, im]`.
#[wasm_bindgen]
pub fn optimal_tau(eps: f64, fmin: f64, fmax: f64) -> Result<JsValue, JsValue> {
    let tau = compute_optimal_tau(eps, fmin, fmax)
        .map_err(|e| JsValue::from_str(&format!("Optimal tau failed: {}", e)))?;
    serialize(&tau)
}

#[wasm_bindgen]
pub fn main_circle(tau_real: f64, tau_imag: f64, eps: f64) -> Result<JsValue, JsValue> {
    let circle = compute_main_circle(tau_from_parts(tau_real, tau_imag), eps)
        .map_err(|e| JsValue::from_str(&format!("Main circle failed: {}", e)))?;
    serialize(&circle)
}

#[wasm_bindgen]
pub fn frequency_circles(
    tau_real: f64,
    tau_imag: f64,
    eps: f64,
    fmin: f64,
    fmax: f64,
    n_freqs: i32,
) -> Result<JsValue, JsValue> {
    let circles = frequency_count(n_freqs)
        .and_then(|n| {
            compute_frequency_circles(tau_from_parts(tau_real, tau_imag), eps, fmin, fmax, n)
        })
        .map_err(|e| JsValue::from_str(&format!("Frequency circles failed: {}", e)))?;
    serialize(&circles)
}

#[wasm_bindgen]
pub fn axis_scale(goal: f64, scale: f64) -> Result<JsValue, JsValue> {
    let axis = compute_axis_scale(goal, scale)
        .map_err(|e| JsValue::from_str(&format!("Axis scale failed: {}", e)))?;
    serialize(&axis)
}

/// Worst-case amplification of `tau` over the given frequencies.
#[wasm_bindgen]
pub fn amplification(
    tau_real: f64,
    tau_imag: f64,
    eps: f64,
    freqs: Float64Array,
) -> Result<f64, JsValue> {
    let omegas = omegas_for(&freqs.to_vec(), eps);
    core_amplification(tau_from_parts(tau_real, tau_imag), &omegas)
        .map_err(|e| JsValue::from_str(&format!("Amplification failed: {}", e)))
}

#[wasm_bindgen]
pub fn amplification_optimal(eps: f64, fmin: f64, fmax: f64) -> Result<f64, JsValue> {
    core_amplification_optimal(eps, fmin, fmax)
        .map_err(|e| JsValue::from_str(&format!("Optimal amplification failed: {}", e)))
}

fn omegas_for(freqs: &[f64], eps: f64) -> Vec<Number> {
    freqs.iter().map(|&f| angular_frequency(f, eps)).collect()
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn optimal_tau_reports_degenerate_band() {
        let err = optimal_tau(0.7, 3.0, 3.0).expect_err("empty band");
        let message = err.as_string().unwrap_or_default();
        assert!(message.contains("fmin must be smaller than fmax"), "{message}");
    }

    #[wasm_bindgen_test]
    fn frequency_circles_rejects_negative_count() {
        let err = frequency_circles(11.3, -20.0, 0.7, 1.0, 9.0, -1).expect_err("negative count");
        let message = err.as_string().unwrap_or_default();
        assert!(message.contains("n_freqs must be at least 1"), "{message}");
    }

    #[wasm_bindgen_test]
    fn amplification_accepts_typed_array() {
        let freqs = Float64Array::from(&[1.0, 5.0, 9.0][..]);
        let tau = compute_optimal_tau(0.7, 1.0, 9.0).expect("tau");
        let value = amplification(tau.re(), tau.im(), 0.7, freqs).expect("J");
        assert!(value > 0.0 && value < 1.0);
    }

    #[wasm_bindgen_test]
    fn axis_scale_serializes() {
        let value = axis_scale(25.0, 1.0).expect("axis");
        assert!(value.is_object());
    }
}
