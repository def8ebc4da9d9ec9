//! Adaptive grid spacing.
//!
//! Grid lines are placed at integer multiples of `10^k`, stepping by 2, 5 or
//! 10 of those units, so they always land on round world values whatever the
//! zoom. Every tenth unit is a major line.

use crate::error::{ComputeError, Result};
use serde::{Deserialize, Serialize};

/// Step multipliers tried in order; ties go to the earlier entry.
pub const STEP_MULTIPLIERS: [i64; 3] = [2, 5, 10];

/// Label spacings (in units) tried in order until labels are wide enough apart.
pub const LABEL_MULTIPLES: [i64; 3] = [10, 20, 50];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisScale {
    /// World distance between neighbouring grid lines, `multiplier * 10^k`.
    pub step: f64,
    /// One of [`STEP_MULTIPLIERS`].
    pub multiplier: i64,
    /// `k` in `10^k`.
    pub decimal_power: i32,
    pub pixels_per_unit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisLine {
    pub index: i64,
    /// Pixel coordinate along the axis, measured from the axis origin.
    pub pixel: f64,
    pub major: bool,
}

/// Rounds halves towards positive infinity.
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// The power of ten nearest to `x` on a logarithmic scale.
pub fn round_pow10(x: f64) -> f64 {
    10f64.powf(round_half_up(x.log10()))
}

/// Index of the first smallest value, or `None` for an empty slice.
pub fn argmin(values: &[f64]) -> Option<usize> {
    let (first, rest) = values.split_first()?;
    let mut best = (0, *first);
    for (i, &value) in rest.iter().enumerate() {
        if value < best.1 {
            best = (i + 1, value);
        }
    }
    Some(best.0)
}

/// Picks the grid step whose pixel spacing is closest to `goal` pixels.
pub fn compute_axis_scale(goal: f64, scale: f64) -> Result<AxisScale> {
    if !goal.is_finite() || goal <= 0.0 {
        return Err(ComputeError::domain(format!(
            "grid spacing goal must be positive, got {goal}"
        )));
    }
    if !scale.is_finite() || scale <= 0.0 {
        return Err(ComputeError::domain(format!(
            "pixel scale must be positive, got {scale}"
        )));
    }

    let deviations: Vec<f64> = STEP_MULTIPLIERS
        .iter()
        .map(|&k| {
            let k = k as f64;
            (k * round_pow10(goal / (k * scale)) * scale - goal).abs()
        })
        .collect();
    let chosen = argmin(&deviations)
        .ok_or_else(|| ComputeError::domain("no grid step candidates"))?;
    let multiplier = STEP_MULTIPLIERS[chosen];
    let decimal_power = round_half_up((goal / (multiplier as f64 * scale)).log10()) as i32;

    Ok(AxisScale {
        step: multiplier as f64 * 10f64.powi(decimal_power),
        multiplier,
        decimal_power,
        pixels_per_unit: scale,
    })
}

impl AxisScale {
    /// World size of one grid unit, `10^k`.
    pub fn unit(&self) -> f64 {
        10f64.powi(self.decimal_power)
    }

    pub fn pixel_spacing(&self) -> f64 {
        self.step * self.pixels_per_unit
    }

    /// Smallest of [`LABEL_MULTIPLES`] whose spacing is at least `min_pixels`,
    /// falling back to the coarsest.
    pub fn label_multiple(&self, min_pixels: f64) -> i64 {
        let unit_pixels = self.unit() * self.pixels_per_unit;
        let mut multiple = LABEL_MULTIPLES[0];
        for &candidate in &LABEL_MULTIPLES[1..] {
            if (multiple as f64) * unit_pixels < min_pixels {
                multiple = candidate;
            }
        }
        multiple
    }

    /// Unit indices of the first and last grid line covering the world range
    /// `[origin, origin + extent_pixels / pixels_per_unit]`.
    pub fn index_range(&self, origin: f64, extent_pixels: f64) -> (i64, i64) {
        let stride = self.step;
        let end = origin + extent_pixels / self.pixels_per_unit;
        let first = (origin / stride).floor() as i64 * self.multiplier;
        let last = (end / stride).ceil() as i64 * self.multiplier;
        (first, last)
    }

    /// Pixel offset of unit index `index` relative to world coordinate `origin`.
    pub fn pixel_of(&self, index: i64, origin: f64) -> f64 {
        round_half_up((index as f64 * self.unit() - origin) * self.pixels_per_unit)
    }

    /// Grid lines along one axis, shifted half a pixel for crisp 1px strokes.
    pub fn grid_lines(&self, origin: f64, extent_pixels: f64) -> Vec<AxisLine> {
        let (first, last) = self.index_range(origin, extent_pixels);
        (first..=last)
            .step_by(self.multiplier as usize)
            .map(|index| AxisLine {
                index,
                pixel: self.pixel_of(index, origin) + 0.5,
                major: index % 10 == 0,
            })
            .collect()
    }

    /// Decimals needed to print a label at this scale.
    pub fn label_decimals(&self) -> usize {
        (-1 - self.decimal_power).max(0) as usize
    }

    pub fn format_label(&self, index: i64) -> String {
        format_fixed(index as f64 * self.unit(), self.label_decimals())
    }
}

/// Label indices: multiples of `multiple` within `[first, last]`.
pub fn label_indices(first: i64, last: i64, multiple: i64) -> impl Iterator<Item = i64> {
    let start = div_ceil(first, multiple) * multiple;
    let stop = last.div_euclid(multiple) * multiple;
    (start..=stop).step_by(multiple as usize)
}

fn div_ceil(a: i64, b: i64) -> i64 {
    -((-a).div_euclid(b))
}

/// Formats `value` with exactly `decimals` digits after the point, rounding
/// halves up. Zero is never printed with a sign.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let factor = 10f64.powi(decimals as i32);
    let scaled = round_half_up(value * factor) as i64;
    if decimals == 0 {
        return scaled.to_string();
    }
    let sign = if scaled < 0 { "-" } else { "" };
    let magnitude = scaled.unsigned_abs();
    let divisor = 10u64.pow(decimals as u32);
    format!(
        "{sign}{}.{:0width$}",
        magnitude / divisor,
        magnitude % divisor,
        width = decimals
    )
}
