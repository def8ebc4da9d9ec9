//! Closed-form optimal complex shift.

use crate::error::{ensure_positive_band, ensure_positive_eps, ComputeError, Result};
use crate::number::Number;
use log::debug;
use std::f64::consts::PI;

/// Optimal tau for the angular band `[w, big_w]` and damping ratio `eps`.
///
/// `|tau| = sqrt(w W (1 + eps^2))` and its argument is
/// `atan2(-sqrt(eps^2 (W + w)^2 + (W - w)^2), 2 sqrt(w W))`, which lies in
/// `[-pi/2, 0]` for a valid band, so tau sits in the lower half-plane.
pub fn optimal_tau(eps: f64, w: f64, big_w: f64) -> Result<Number> {
    ensure_positive_eps(eps)?;
    ensure_positive_band(w, big_w)?;

    let tau = closed_form_tau(eps, w, big_w);
    if tau.im() == 0.0 || !tau.is_finite() {
        return Err(ComputeError::domain(format!(
            "optimal tau is degenerate for eps = {eps}, band [{w}, {big_w}]"
        )));
    }
    Ok(tau)
}

/// Optimal tau for the frequency band `[fmin, fmax]`, converted to angular
/// frequencies before solving.
pub fn compute_optimal_tau(eps: f64, fmin: f64, fmax: f64) -> Result<Number> {
    ensure_positive_band(fmin, fmax)?;
    let tau = optimal_tau(eps, 2.0 * PI * fmin, 2.0 * PI * fmax)?;
    debug!("optimal tau for eps={eps}, f=[{fmin}, {fmax}]: {tau}");
    Ok(tau)
}

/// The unchecked formula behind [`optimal_tau`].
pub(crate) fn closed_form_tau(eps: f64, w: f64, big_w: f64) -> Number {
    let r = (w * big_w * (1.0 + eps * eps)).sqrt();
    let theta = f64::atan2(
        -(sqr(eps * (big_w + w)) + sqr(big_w - w)).sqrt(),
        2.0 * (w * big_w).sqrt(),
    );
    Number::complex(r * theta.cos(), r * theta.sin())
}

pub(crate) fn sqr(x: f64) -> f64 {
    x * x
}
