//! WASM bindings for optau_core
//!
//! Exposes the optimal-tau computations and the per-frame scene builder to
//! the JavaScript page that draws them.

use optau_core::ComputeError;
use wasm_bindgen::prelude::*;

mod analysis;
mod plot;

pub use analysis::{
    amplification, amplification_optimal, axis_scale, frequency_circles, main_circle, optimal_tau,
};
pub use plot::WasmPlot;

/// Get the library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Converts a frequency count received from JavaScript. Values below one
/// are rejected before they can reach a `usize`.
pub(crate) fn frequency_count(value: i32) -> optau_core::Result<usize> {
    usize::try_from(value)
        .ok()
        .filter(|&n| n >= 1)
        .ok_or_else(|| ComputeError::domain(format!("n_freqs must be at least 1, got {value}")))
}

/// Installs the panic hook and, in the browser, routes `log` to the console.
pub(crate) fn init_console() {
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    {
        // A second call fails because a logger is already set; that is fine.
        let _ = console_log::init_with_level(log::Level::Info);
    }
}
