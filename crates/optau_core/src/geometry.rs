//! Frequency sampling and the circles induced by a shift tau.

use crate::error::{ensure_band, ensure_positive_eps, ComputeError, Result};
use crate::number::Number;
use crate::solver::sqr;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A circle in the complex plane. The center is always a complex number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Number,
    pub radius: f64,
}

/// Linearly spaced frequencies over `[fmin, fmax]`, both ends included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencySample {
    freqs: Vec<f64>,
}

impl FrequencySample {
    pub fn linspace(fmin: f64, fmax: f64, n: usize) -> Result<Self> {
        if n < 2 {
            return Err(ComputeError::domain(format!(
                "frequency sample needs at least 2 points, got {n}"
            )));
        }
        ensure_band(fmin, fmax)?;
        let last = (n - 1) as f64;
        let freqs = (0..n)
            .map(|k| fmin + k as f64 * (fmax - fmin) / last)
            .collect();
        Ok(Self { freqs })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.freqs
    }

    pub fn len(&self) -> usize {
        self.freqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.freqs.is_empty()
    }
}

/// Complex angular frequency `2 pi f - i 2 pi f eps`.
pub fn angular_frequency(freq: f64, eps: f64) -> Number {
    Number::complex(2.0 * PI * freq, -2.0 * PI * freq * eps)
}

pub fn angular_frequencies(sample: &FrequencySample, eps: f64) -> Vec<Number> {
    sample
        .as_slice()
        .iter()
        .map(|&freq| angular_frequency(freq, eps))
        .collect()
}

pub(crate) fn ensure_complex_tau(tau: Number) -> Result<()> {
    if !tau.is_finite() {
        return Err(ComputeError::domain(format!("tau must be finite, got {tau}")));
    }
    if tau.im() == 0.0 {
        return Err(ComputeError::domain(format!(
            "tau must have a nonzero imaginary part, got {tau}"
        )));
    }
    Ok(())
}

/// The constant `1/2 + i re(tau) / (2 im(tau))` every per-frequency center is
/// measured from.
pub(crate) fn center_base(tau: Number) -> Number {
    Number::complex(0.5, tau.re() / (2.0 * tau.im()))
}

/// Radius shared by all per-frequency circles: `|tau| / (2 |im(tau)|)`.
pub fn frequency_circle_radius(tau: Number) -> Result<f64> {
    ensure_complex_tau(tau)?;
    Ok(tau.abs() / (2.0 * tau.im()).abs())
}

/// Center of the circle induced by angular frequency `omega`:
/// `base - omega / (omega - tau)`.
pub fn frequency_circle_center(tau: Number, omega: Number) -> Result<Number> {
    ensure_complex_tau(tau)?;
    let eta = omega.divide(omega - tau).map_err(|_| {
        ComputeError::domain(format!("angular frequency {omega} coincides with tau"))
    })?;
    Ok(center_base(tau) - eta)
}

/// The invariant circle the per-frequency circles are compared against.
pub fn compute_main_circle(tau: Number, eps: f64) -> Result<Circle> {
    ensure_complex_tau(tau)?;
    ensure_positive_eps(eps)?;

    let (re, im) = (tau.re(), tau.im());
    let shifted = im + eps * re;
    if shifted == 0.0 {
        return Err(ComputeError::domain(format!(
            "im(tau) + eps re(tau) vanishes for tau = {tau}, eps = {eps}"
        )));
    }
    let abs_sqr = tau.abs_squared();
    let center = Number::complex(0.0, eps * abs_sqr / (2.0 * im * shifted));
    let radius = (abs_sqr * (sqr(eps) + 1.0) / (4.0 * sqr(shifted))).sqrt();
    Ok(Circle { center, radius })
}

/// One circle per sampled frequency, in increasing frequency order.
pub fn compute_frequency_circles(
    tau: Number,
    eps: f64,
    fmin: f64,
    fmax: f64,
    n_freqs: usize,
) -> Result<Vec<Circle>> {
    ensure_positive_eps(eps)?;
    let sample = FrequencySample::linspace(fmin, fmax, n_freqs)?;
    frequency_circles(tau, &angular_frequencies(&sample, eps))
}

pub(crate) fn frequency_circles(tau: Number, omegas: &[Number]) -> Result<Vec<Circle>> {
    let radius = frequency_circle_radius(tau)?;
    omegas
        .iter()
        .map(|&omega| {
            Ok(Circle {
                center: frequency_circle_center(tau, omega)?,
                radius,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::compute_optimal_tau;

    #[test]
    fn linspace_includes_both_ends() {
        let sample = FrequencySample::linspace(1.0, 9.0, 5).expect("sample");
        assert_eq!(sample.as_slice(), &[1.0, 3.0, 5.0, 7.0, 9.0]);
        let pair = FrequencySample::linspace(2.0, 3.0, 2).expect("sample");
        assert_eq!(pair.as_slice(), &[2.0, 3.0]);
    }

    #[test]
    fn linspace_rejects_single_point_and_degenerate_band() {
        for n in [0, 1] {
            let err = FrequencySample::linspace(1.0, 9.0, n).expect_err("too few points");
            assert!(err.is_domain());
        }
        let err = FrequencySample::linspace(4.0, 4.0, 7).expect_err("empty band");
        assert!(err.is_domain());
    }

    #[test]
    fn angular_frequency_lies_below_real_axis() {
        let omega = angular_frequency(1.0, 0.5);
        assert!((omega.re() - 2.0 * PI).abs() < 1e-15);
        assert!((omega.im() + PI).abs() < 1e-15);
    }

    #[test]
    fn main_circle_for_default_settings() {
        let tau = compute_optimal_tau(0.7, 1.0, 9.0).expect("tau");
        let circle = compute_main_circle(tau, 0.7).expect("circle");
        assert!(circle.center.is_complex());
        assert_eq!(circle.center.re(), 0.0);
        assert!((circle.center.im() - 0.7629468244568572).abs() < 1e-9);
        assert!((circle.radius - 1.1586051416198944).abs() < 1e-9);
    }

    #[test]
    fn main_circle_radius_is_non_negative() {
        for (re, im) in [(1.0, -1.0), (-3.0, 2.0), (0.0, -0.5), (10.0, 4.0)] {
            for eps in [0.05, 0.7, 3.0] {
                let tau = Number::complex(re, im);
                match compute_main_circle(tau, eps) {
                    Ok(circle) => assert!(circle.radius >= 0.0),
                    Err(err) => assert!(err.is_domain(), "unexpected error {err}"),
                }
            }
        }
    }

    #[test]
    fn frequency_circles_share_one_radius() {
        let tau = compute_optimal_tau(0.7, 1.0, 9.0).expect("tau");
        let circles = compute_frequency_circles(tau, 0.7, 1.0, 9.0, 7).expect("circles");
        assert_eq!(circles.len(), 7);
        let radius = frequency_circle_radius(tau).expect("radius");
        assert!((radius - 0.5741480799402843).abs() < 1e-12);
        assert!(circles.iter().all(|c| c.radius == radius));
        assert!(circles.iter().all(|c| c.center.is_complex()));
    }

    #[test]
    fn frequency_circle_centers_move_continuously() {
        let tau = Number::complex(4.0, -3.0);
        let circles = compute_frequency_circles(tau, 0.4, 1.0, 2.0, 400).expect("circles");
        for pair in circles.windows(2) {
            let step = (pair[1].center - pair[0].center).abs();
            assert!(step < 0.05, "center jumped by {step}");
        }
    }

    #[test]
    fn real_tau_is_rejected() {
        let err = compute_main_circle(Number::real(3.0), 0.7).expect_err("real tau");
        assert!(err.is_domain());
        let err = compute_main_circle(Number::complex(3.0, 0.0), 0.7).expect_err("real tau");
        assert!(err.is_domain());
        let err = frequency_circle_radius(Number::complex(3.0, 0.0)).expect_err("real tau");
        assert!(err.is_domain());
    }

    #[test]
    fn omega_equal_to_tau_is_rejected() {
        let omega = angular_frequency(1.0, 0.5);
        let err = frequency_circle_center(omega, omega).expect_err("coinciding");
        assert!(err.to_string().contains("coincides with tau"));
    }

    #[test]
    fn main_circle_rejects_non_positive_eps() {
        let err = compute_main_circle(Number::complex(1.0, -1.0), 0.0).expect_err("eps");
        assert!(err.is_range());
    }
}
