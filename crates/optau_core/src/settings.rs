//! User-adjustable inputs and the per-pass snapshot taken from them.

use crate::error::{ensure_band, ensure_positive_band, ensure_positive_eps, ComputeError, Result};
use crate::geometry::ensure_complex_tau;
use crate::number::Number;
use crate::solver::{closed_form_tau, compute_optimal_tau};
use log::warn;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub fmin: f64,
    pub fmax: f64,
    pub n_freqs: usize,
    pub eps: f64,
    pub tau: Number,
    /// When set, tau follows the closed-form optimum for (eps, fmin, fmax).
    pub optimal: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let (fmin, fmax, eps) = (1.0, 9.0, 0.7);
        Self {
            fmin,
            fmax,
            n_freqs: 7,
            eps,
            tau: closed_form_tau(eps, 2.0 * PI * fmin, 2.0 * PI * fmax),
            optimal: true,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        ensure_positive_eps(self.eps)?;
        if self.optimal {
            ensure_positive_band(self.fmin, self.fmax)?;
        } else {
            ensure_band(self.fmin, self.fmax)?;
        }
        if self.n_freqs < 2 {
            return Err(ComputeError::domain(format!(
                "n_freqs must be at least 2, got {}",
                self.n_freqs
            )));
        }
        ensure_complex_tau(self.tau)
    }

    /// Validated copy for one computation pass, with tau resolved when the
    /// optimal mode is on.
    pub fn snapshot(&self) -> Result<Settings> {
        let mut snapshot = *self;
        if snapshot.optimal {
            snapshot.tau = compute_optimal_tau(snapshot.eps, snapshot.fmin, snapshot.fmax)?;
        }
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Applies `edit` to a copy and keeps it only if the result is valid.
    pub fn update(&mut self, edit: impl FnOnce(&mut Settings)) -> Result<()> {
        let mut candidate = *self;
        edit(&mut candidate);
        match candidate.snapshot() {
            Ok(snapshot) => {
                *self = snapshot;
                Ok(())
            }
            Err(err) => {
                warn!("rejected settings update: {err}");
                Err(err)
            }
        }
    }

    pub fn set_fmin(&mut self, fmin: f64) -> Result<()> {
        self.update(|s| s.fmin = fmin)
    }

    pub fn set_fmax(&mut self, fmax: f64) -> Result<()> {
        self.update(|s| s.fmax = fmax)
    }

    pub fn set_n_freqs(&mut self, n_freqs: usize) -> Result<()> {
        self.update(|s| s.n_freqs = n_freqs)
    }

    pub fn set_eps(&mut self, eps: f64) -> Result<()> {
        self.update(|s| s.eps = eps)
    }

    /// Setting tau by hand leaves the optimal mode.
    pub fn set_tau_real(&mut self, re: f64) -> Result<()> {
        self.update(|s| {
            s.optimal = false;
            s.tau = Number::complex(re, s.tau.im());
        })
    }

    /// Setting tau by hand leaves the optimal mode.
    pub fn set_tau_imag(&mut self, im: f64) -> Result<()> {
        self.update(|s| {
            s.optimal = false;
            s.tau = Number::complex(s.tau.re(), im);
        })
    }

    pub fn set_optimal(&mut self, optimal: bool) -> Result<()> {
        self.update(|s| s.optimal = optimal)
    }

    pub fn toggle_optimal(&mut self) -> Result<()> {
        let optimal = !self.optimal;
        self.set_optimal(optimal)
    }
}
