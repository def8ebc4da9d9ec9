//! The `optau_core` crate is the numerical engine behind the optimal-tau plot.
//! Given a damping ratio and a frequency band it computes the closed-form
//! optimal complex shift, the invariant main circle, one circle per sampled
//! frequency and a grid layout for drawing them at any zoom.
//!
//! Key components:
//! - **Number**: real-or-complex scalar with a real fast path.
//! - **Solver**: closed-form optimal tau.
//! - **Amplification**: worst-case `J` over a sample and its closed form at the optimum.
//! - **Geometry**: frequency sampling and frequency-to-circle mapping.
//! - **Axis**: "nice number" grid step selection and label formatting.
//! - **Scene / Plot**: one redraw pass turned into a serializable render plan.

pub mod amplification;
pub mod axis;
pub mod error;
pub mod geometry;
pub mod number;
pub mod plot;
pub mod scene;
pub mod schedule;
pub mod settings;
pub mod solver;

pub use amplification::{amplification, amplification_optimal};
pub use axis::{compute_axis_scale, AxisScale};
pub use error::{ComputeError, Result};
pub use geometry::{compute_frequency_circles, compute_main_circle, Circle, FrequencySample};
pub use number::Number;
pub use settings::Settings;
pub use solver::compute_optimal_tau;
