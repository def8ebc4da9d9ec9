use thiserror::Error;

/// Errors reported by the numerical core.
///
/// Every computation fails synchronously with one of these instead of
/// letting an infinity or NaN leak into the geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComputeError {
    /// Input outside the domain of the formula (zero divisor, degenerate band,
    /// real-valued tau, too few samples).
    #[error("domain error: {0}")]
    Domain(String),
    /// A parameter that must be strictly positive is not.
    #[error("range error: {0}")]
    Range(String),
}

impl ComputeError {
    pub fn domain(message: impl Into<String>) -> Self {
        ComputeError::Domain(message.into())
    }

    pub fn range(message: impl Into<String>) -> Self {
        ComputeError::Range(message.into())
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, ComputeError::Domain(_))
    }

    pub fn is_range(&self) -> bool {
        matches!(self, ComputeError::Range(_))
    }
}

pub type Result<T> = std::result::Result<T, ComputeError>;

/// Rejects `eps <= 0` and non-finite damping ratios.
pub(crate) fn ensure_positive_eps(eps: f64) -> Result<()> {
    if !eps.is_finite() {
        return Err(ComputeError::range(format!("eps must be finite, got {eps}")));
    }
    if eps <= 0.0 {
        return Err(ComputeError::range(format!("eps must be positive, got {eps}")));
    }
    Ok(())
}

/// Rejects bands that are not `fmin < fmax` with finite ends.
pub(crate) fn ensure_band(fmin: f64, fmax: f64) -> Result<()> {
    if !fmin.is_finite() || !fmax.is_finite() {
        return Err(ComputeError::domain(format!(
            "frequency band must be finite, got [{fmin}, {fmax}]"
        )));
    }
    if fmin >= fmax {
        return Err(ComputeError::domain(format!(
            "fmin must be smaller than fmax, got [{fmin}, {fmax}]"
        )));
    }
    Ok(())
}

/// Like [`ensure_band`], additionally requiring `fmin > 0`.
pub(crate) fn ensure_positive_band(fmin: f64, fmax: f64) -> Result<()> {
    ensure_band(fmin, fmax)?;
    if fmin <= 0.0 {
        return Err(ComputeError::domain(format!(
            "fmin must be positive, got {fmin}"
        )));
    }
    Ok(())
}
