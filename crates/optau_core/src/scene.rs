//! Render plan for one redraw pass.
//!
//! Everything here is in device pixels with the origin at the top-left corner
//! of the canvas. World coordinates have the imaginary axis pointing up, so
//! vertical positions are flipped on the way out.

use crate::axis::{compute_axis_scale, label_indices, round_half_up, AxisScale};
use crate::error::{ComputeError, Result};
use crate::geometry::{angular_frequencies, compute_main_circle, frequency_circles, FrequencySample};
use crate::number::Number;
use crate::settings::Settings;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            device_pixel_ratio: 1.0,
        }
    }
}

/// Layout constants, in CSS pixels unless noted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub grid_goal: f64,
    pub min_label_spacing: f64,
    /// Device pixels between the plot frame and its labels.
    pub label_gap: f64,
    /// Factor applied to the combined circle radii when fitting the view.
    pub padding: f64,
    pub font_size: f64,
    pub circle_line_width: f64,
    pub marker_radius: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            margin_left: 50.0,
            margin_right: 50.0,
            margin_top: 75.0,
            margin_bottom: 50.0,
            grid_goal: 25.0,
            min_label_spacing: 50.0,
            label_gap: 10.0,
            padding: 1.05,
            font_size: 12.0,
            circle_line_width: 2.0,
            marker_radius: 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub orientation: Orientation,
    pub position: f64,
    pub major: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelAnchor {
    /// Centered horizontally, hanging below the anchor point.
    TopCenter,
    /// Right-aligned, centered vertically on the anchor point.
    MiddleRight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub anchor: LabelAnchor,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CircleStyle {
    Main,
    /// Hue in degrees, spread evenly over the sampled frequencies.
    Frequency { index: usize, frequency: f64, hue: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneCircle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub style: CircleStyle,
}

/// The plotting area inside the margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub tau: Number,
    /// Device pixels per world unit.
    pub scale: f64,
    /// World coordinates of the bottom-left canvas corner.
    pub offset: (f64, f64),
    pub axis: AxisScale,
    pub label_multiple: i64,
    pub frame: Frame,
    pub grid: Vec<GridLine>,
    pub labels: Vec<Label>,
    /// The main circle first, then one circle per frequency.
    pub circles: Vec<SceneCircle>,
    pub grid_line_width: f64,
    pub circle_line_width: f64,
    pub marker_radius: f64,
    pub font_size: f64,
}

/// Computes everything the presentation layer needs to draw one frame.
pub fn compute_scene(
    settings: &Settings,
    viewport: &Viewport,
    layout: &LayoutSettings,
) -> Result<Scene> {
    let settings = settings.snapshot()?;
    let Viewport {
        width,
        height,
        device_pixel_ratio: dpr,
    } = *viewport;
    if !(dpr.is_finite() && dpr > 0.0) {
        return Err(ComputeError::domain(format!(
            "device pixel ratio must be positive, got {dpr}"
        )));
    }

    let tau = settings.tau;
    let main = compute_main_circle(tau, settings.eps)?;
    let sample = FrequencySample::linspace(settings.fmin, settings.fmax, settings.n_freqs)?;
    let circles = frequency_circles(tau, &angular_frequencies(&sample, settings.eps))?;
    let radius = circles.first().map_or(0.0, |c| c.radius);

    let frame = Frame {
        left: round_half_up(layout.margin_left * dpr),
        top: round_half_up(layout.margin_top * dpr),
        right: width - round_half_up(layout.margin_right * dpr),
        bottom: height - round_half_up(layout.margin_bottom * dpr),
    };
    let plot_width = frame.right - frame.left;
    let plot_height = frame.bottom - frame.top;
    if !(plot_width > 0.0 && plot_height > 0.0) {
        return Err(ComputeError::domain(format!(
            "viewport {width}x{height} leaves no room inside the margins"
        )));
    }

    let drawing_radius = (main.radius + radius) * layout.padding;
    let scale = plot_width.min(plot_height) / (2.0 * drawing_radius);
    let margin_bottom = height - frame.bottom;
    let offset = (
        -plot_width / (2.0 * scale) - frame.left / scale + main.center.re(),
        -plot_height / (2.0 * scale) - margin_bottom / scale + main.center.im(),
    );

    let axis = compute_axis_scale(layout.grid_goal * dpr, scale)?;
    let label_multiple = axis.label_multiple(layout.min_label_spacing * dpr);

    let mut grid = Vec::new();
    for line in axis.grid_lines(offset.0, width) {
        grid.push(GridLine {
            orientation: Orientation::Vertical,
            position: line.pixel,
            major: line.major,
        });
    }
    for line in axis.grid_lines(offset.1, height) {
        grid.push(GridLine {
            orientation: Orientation::Horizontal,
            position: height - line.pixel,
            major: line.major,
        });
    }

    let mut labels = Vec::new();
    let (x_first, x_last) = axis.index_range(offset.0, width);
    for index in label_indices(x_first, x_last, label_multiple) {
        let x = axis.pixel_of(index, offset.0);
        if x >= frame.left && x <= frame.right {
            labels.push(Label {
                text: axis.format_label(index),
                x,
                y: round_half_up(frame.bottom + layout.label_gap),
                anchor: LabelAnchor::TopCenter,
            });
        }
    }
    let (y_first, y_last) = axis.index_range(offset.1, height);
    for index in label_indices(y_first, y_last, label_multiple) {
        let y = height - axis.pixel_of(index, offset.1);
        if y >= frame.top && y <= frame.bottom {
            labels.push(Label {
                text: axis.format_label(index),
                x: round_half_up(frame.left - layout.label_gap),
                y,
                anchor: LabelAnchor::MiddleRight,
            });
        }
    }

    let to_screen = |center: Number| {
        (
            (center.re() - offset.0) * scale + 0.5,
            height - ((center.im() - offset.1) * scale + 0.5),
        )
    };
    let mut scene_circles = Vec::with_capacity(circles.len() + 1);
    let (x, y) = to_screen(main.center);
    scene_circles.push(SceneCircle {
        x,
        y,
        radius: main.radius * scale,
        style: CircleStyle::Main,
    });
    let n = circles.len();
    for (index, (circle, &frequency)) in circles.iter().zip(sample.as_slice()).enumerate() {
        let (x, y) = to_screen(circle.center);
        scene_circles.push(SceneCircle {
            x,
            y,
            radius: circle.radius * scale,
            style: CircleStyle::Frequency {
                index,
                frequency,
                hue: index as f64 * 360.0 / n as f64,
            },
        });
    }

    debug!(
        "scene: tau={tau}, {n} circles, grid step {} ({} px), labels every {label_multiple} units",
        axis.step,
        axis.pixel_spacing()
    );

    Ok(Scene {
        width,
        height,
        tau,
        scale,
        offset,
        axis,
        label_multiple,
        frame,
        grid,
        labels,
        circles: scene_circles,
        grid_line_width: round_half_up(dpr / 2.0).max(1.0),
        circle_line_width: round_half_up(layout.circle_line_width * dpr),
        marker_radius: layout.marker_radius * dpr,
        font_size: round_half_up(layout.font_size * dpr),
    })
}
