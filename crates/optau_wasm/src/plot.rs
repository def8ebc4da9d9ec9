//! Interactive plot handle owned by the page.

use crate::{frequency_count, init_console};
use anyhow::{Context, Result};
use optau_core::plot::Plot;
use optau_core::scene::{LayoutSettings, Scene, Viewport};
use optau_core::settings::Settings;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

/// Holds the single mutable settings copy. Every setter validates, and a
/// rejected value leaves the previous settings in place.
///
/// Setters return `true` when the caller should request an animation frame;
/// repeated edits before the next `redraw` return `false`.
#[wasm_bindgen]
pub struct WasmPlot {
    inner: Plot,
}

impl WasmPlot {
    fn from_settings(settings: Settings) -> Result<Self> {
        let inner = Plot::new(settings, LayoutSettings::default())
            .context("Invalid initial settings")?;
        Ok(Self { inner })
    }

    fn edit(
        &mut self,
        field: &str,
        edit: impl FnOnce(&mut Settings) -> optau_core::Result<()>,
    ) -> Result<bool> {
        self.inner
            .edit(edit)
            .with_context(|| format!("Invalid value for {field}"))
    }

    fn render(&mut self, viewport: Viewport) -> Result<Scene> {
        self.inner.redraw(&viewport).with_context(|| {
            format!(
                "Failed to build scene for {}x{} viewport",
                viewport.width, viewport.height
            )
        })
    }
}

fn to_js_error(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", err))
}

#[wasm_bindgen]
impl WasmPlot {
    /// Creates a plot from serialized settings, or the defaults when
    /// `settings` is `undefined` or `null`.
    #[wasm_bindgen(constructor)]
    pub fn new(settings: JsValue) -> Result<WasmPlot, JsValue> {
        init_console();

        let settings = if settings.is_undefined() || settings.is_null() {
            Settings::default()
        } else {
            from_value(settings)
                .map_err(|e| JsValue::from_str(&format!("Invalid settings: {}", e)))?
        };
        WasmPlot::from_settings(settings).map_err(to_js_error)
    }

    pub fn settings(&self) -> Result<JsValue, JsValue> {
        to_value(self.inner.settings())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen(getter)]
    pub fn fmin(&self) -> f64 {
        self.inner.settings().fmin
    }

    #[wasm_bindgen(getter)]
    pub fn fmax(&self) -> f64 {
        self.inner.settings().fmax
    }

    #[wasm_bindgen(getter)]
    pub fn n_freqs(&self) -> u32 {
        self.inner.settings().n_freqs as u32
    }

    #[wasm_bindgen(getter)]
    pub fn eps(&self) -> f64 {
        self.inner.settings().eps
    }

    #[wasm_bindgen(getter)]
    pub fn tau_real(&self) -> f64 {
        self.inner.settings().tau.re()
    }

    #[wasm_bindgen(getter)]
    pub fn tau_imag(&self) -> f64 {
        self.inner.settings().tau.im()
    }

    #[wasm_bindgen(getter)]
    pub fn optimal(&self) -> bool {
        self.inner.settings().optimal
    }

    pub fn set_fmin(&mut self, value: f64) -> Result<bool, JsValue> {
        self.edit("fmin", |s| s.set_fmin(value)).map_err(to_js_error)
    }

    pub fn set_fmax(&mut self, value: f64) -> Result<bool, JsValue> {
        self.edit("fmax", |s| s.set_fmax(value)).map_err(to_js_error)
    }

    pub fn set_n_freqs(&mut self, value: i32) -> Result<bool, JsValue> {
        self.edit("n_freqs", |s| s.set_n_freqs(frequency_count(value)?))
            .map_err(to_js_error)
    }

    pub fn set_eps(&mut self, value: f64) -> Result<bool, JsValue> {
        self.edit("eps", |s| s.set_eps(value)).map_err(to_js_error)
    }

    pub fn set_tau_real(&mut self, value: f64) -> Result<bool, JsValue> {
        self.edit("tau_real", |s| s.set_tau_real(value))
            .map_err(to_js_error)
    }

    pub fn set_tau_imag(&mut self, value: f64) -> Result<bool, JsValue> {
        self.edit("tau_imag", |s| s.set_tau_imag(value))
            .map_err(to_js_error)
    }

    pub fn toggle_optimal(&mut self) -> Result<bool, JsValue> {
        self.edit("optimal", |s| s.toggle_optimal())
            .map_err(to_js_error)
    }

    pub fn request_redraw(&mut self) -> bool {
        self.inner.request_redraw()
    }

    /// Marks the canvas for re-measuring and requests a redraw.
    pub fn request_resize(&mut self) -> bool {
        self.inner.request_resize()
    }

    /// Returns and clears the resize mark.
    pub fn take_resize(&mut self) -> bool {
        self.inner.take_resize()
    }

    pub fn redraw_pending(&self) -> bool {
        self.inner.scheduler().is_pending()
    }

    /// Runs one pass for a canvas of `width` x `height` device pixels and
    /// returns the serialized scene.
    pub fn redraw(
        &mut self,
        width: f64,
        height: f64,
        device_pixel_ratio: f64,
    ) -> Result<JsValue, JsValue> {
        let scene = self
            .render(Viewport {
                width,
                height,
                device_pixel_ratio,
            })
            .map_err(to_js_error)?;
        to_value(&scene).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use optau_core::solver::compute_optimal_tau;

    fn default_plot() -> WasmPlot {
        WasmPlot::from_settings(Settings::default()).expect("plot")
    }

    #[test]
    fn setters_coalesce_frame_requests() {
        let mut plot = default_plot();
        assert!(plot.edit("eps", |s| s.set_eps(0.4)).expect("eps"));
        assert!(!plot.edit("fmax", |s| s.set_fmax(11.0)).expect("fmax"));
        assert!(plot.redraw_pending());

        let scene = plot
            .render(Viewport {
                width: 1024.0,
                height: 768.0,
                device_pixel_ratio: 1.0,
            })
            .expect("scene");
        assert!(!plot.redraw_pending());
        assert_eq!(scene.circles.len(), 8);
        let expected = compute_optimal_tau(0.4, 1.0, 11.0).expect("tau");
        assert_eq!(plot.tau_real(), expected.re());
        assert_eq!(plot.tau_imag(), expected.im());
    }

    #[test]
    fn rejected_value_reports_field_and_cause() {
        let mut plot = default_plot();
        let err = plot
            .edit("n_freqs", |s| s.set_n_freqs(1))
            .expect_err("single frequency");
        let message = format!("{:#}", err);
        assert!(message.contains("Invalid value for n_freqs"), "{message}");
        assert!(message.contains("domain error"), "{message}");
        assert_eq!(plot.n_freqs(), 7);
    }

    #[test]
    fn negative_frequency_count_leaves_settings_alone() {
        let mut plot = default_plot();
        let err = plot
            .edit("n_freqs", |s| s.set_n_freqs(frequency_count(-1)?))
            .expect_err("negative count");
        assert!(format!("{:#}", err).contains("n_freqs must be at least 1"));
        assert_eq!(plot.n_freqs(), 7);
        assert!(!plot.redraw_pending());
    }

    #[test]
    fn manual_tau_turns_optimal_off() {
        let mut plot = default_plot();
        plot.edit("tau_imag", |s| s.set_tau_imag(-5.0)).expect("tau");
        assert!(!plot.optimal());
        assert_eq!(plot.tau_imag(), -5.0);
        plot.edit("optimal", |s| s.toggle_optimal()).expect("toggle");
        assert!(plot.optimal());
    }

    #[test]
    fn render_failure_has_context() {
        let mut plot = default_plot();
        let err = plot
            .render(Viewport {
                width: 20.0,
                height: 20.0,
                device_pixel_ratio: 1.0,
            })
            .expect_err("tiny viewport");
        assert!(format!("{:#}", err).contains("Failed to build scene for 20x20 viewport"));
    }

    #[test]
    fn resize_flag_round_trip() {
        let mut plot = default_plot();
        assert!(plot.request_resize());
        assert!(!plot.request_redraw());
        assert!(plot.take_resize());
        assert!(!plot.take_resize());
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn constructor_accepts_undefined_settings() {
        let plot = WasmPlot::new(JsValue::UNDEFINED).expect("plot");
        assert!(plot.optimal());
        assert_eq!(plot.n_freqs(), 7);
    }

    #[wasm_bindgen_test]
    fn setter_error_is_a_string() {
        let mut plot = WasmPlot::new(JsValue::NULL).expect("plot");
        let err = plot.set_eps(-1.0).expect_err("eps");
        let message = err.as_string().unwrap_or_default();
        assert!(message.contains("range error"), "{message}");
    }

    #[wasm_bindgen_test]
    fn negative_n_freqs_is_rejected() {
        let mut plot = WasmPlot::new(JsValue::UNDEFINED).expect("plot");
        let err = plot.set_n_freqs(-1).expect_err("negative count");
        let message = err.as_string().unwrap_or_default();
        assert!(message.contains("domain error"), "{message}");
        assert_eq!(plot.n_freqs(), 7);
    }

    #[wasm_bindgen_test]
    fn redraw_returns_scene_object() {
        let mut plot = WasmPlot::new(JsValue::UNDEFINED).expect("plot");
        plot.request_redraw();
        let scene = plot.redraw(800.0, 600.0, 1.0).expect("scene");
        assert!(scene.is_object());
        assert!(!plot.redraw_pending());
    }
}
