//! Pipeline stages for approximating a black-box function.
//!
//! Each stage is a [`Component`](blackbox_core::Component):
//!
//! - [`client::MeasurementClient`] queries the measurement service once
//! - [`sampler::Sampler`] probes the domain and keeps the valid readings
//! - [`interpolation::Interpolator`] fills the gaps on a dense grid
//! - [`approximation::Approximator`] fits and formats a polynomial
//!
//! [`pipeline`] chains them into a single component.

pub mod approximation;
pub mod client;
pub mod interpolation;
pub mod pipeline;
pub mod polynomial;
pub mod sampler;
