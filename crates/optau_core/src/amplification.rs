//! Worst-case amplification over a frequency sample.

use crate::error::{ensure_positive_band, ensure_positive_eps, ComputeError, Result};
use crate::geometry::{frequency_circle_center, frequency_circle_radius};
use crate::number::Number;
use crate::solver::{optimal_tau, sqr};
use std::f64::consts::PI;

/// `J(omegas, tau)`: the largest ratio of the shared circle radius to the
/// distance of a per-frequency circle center from the origin.
pub fn amplification(tau: Number, omegas: &[Number]) -> Result<f64> {
    let radius = frequency_circle_radius(tau)?;

    let mut worst: Option<f64> = None;
    for &omega in omegas {
        if !omega.is_finite() {
            return Err(ComputeError::domain(format!(
                "angular frequency {omega} is not finite"
            )));
        }
        let center = frequency_circle_center(tau, omega)?;
        let distance = center.abs();
        if distance == 0.0 {
            return Err(ComputeError::domain(format!(
                "circle center for angular frequency {omega} sits at the origin"
            )));
        }
        let ratio = radius / distance;
        worst = Some(worst.map_or(ratio, |w| w.max(ratio)));
    }
    worst.ok_or_else(|| ComputeError::domain("amplification needs at least one angular frequency"))
}

/// Closed-form `J` at the optimal tau for the angular band `[w, big_w]`.
pub fn amplification_optimal_angular(eps: f64, w: f64, big_w: f64) -> Result<f64> {
    let tau = optimal_tau(eps, w, big_w)?;
    let (re, im) = (tau.re(), tau.im());

    let r = 0.5 * (1.0 + sqr(re / im)).sqrt();
    let shifted = re * eps + im;
    if shifted == 0.0 {
        return Err(ComputeError::domain(format!(
            "re(tau) eps + im(tau) vanishes for eps = {eps}"
        )));
    }
    let c1_im = re / (2.0 * im) - shifted * w / (sqr(w - re) + sqr(eps * w + im));
    let big_r = tau.abs() * (sqr(eps) + 1.0).sqrt() / (2.0 * shifted.abs());
    let big_c_im = eps * tau.abs_squared() / (2.0 * im * shifted);

    let denom = sqr(big_r) - sqr(big_c_im) + 2.0 * big_c_im * c1_im;
    if denom.is_nan() || denom <= 0.0 {
        return Err(ComputeError::domain(format!(
            "optimal amplification is undefined for eps = {eps}, band [{w}, {big_w}]"
        )));
    }
    Ok((sqr(r) / denom).sqrt())
}

/// Closed-form `J` at the optimal tau for the frequency band `[fmin, fmax]`.
pub fn amplification_optimal(eps: f64, fmin: f64, fmax: f64) -> Result<f64> {
    ensure_positive_eps(eps)?;
    ensure_positive_band(fmin, fmax)?;
    amplification_optimal_angular(eps, 2.0 * PI * fmin, 2.0 * PI * fmax)
}
