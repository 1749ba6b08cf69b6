//! The sampling-to-approximation pipeline.
//!
//! [`analyzer`] chains the [`Sampler`], [`Interpolator`] and [`Approximator`]
//! into one component that turns a [`Domain`] into an [`Approximation`]. Every
//! stage error is mapped into [`PipelineError`], and every failure is final.

use std::error::Error as StdError;

use blackbox_core::{Component, Domain, Reading, Series, SeriesError};
use thiserror::Error;

use crate::{
    approximation::{Approximation, Approximator, DEFAULT_DEGREE},
    interpolation::{DEFAULT_DENSE_COUNT, InterpError, Interpolator},
    polynomial::FitError,
    sampler::{DEFAULT_PROBE_COUNT, SampleError, Sampled, Sampler},
};

/// Errors that end a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("measurement service transport failure")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    #[error("measurement service returned an invalid sample")]
    InvalidSample(#[source] SeriesError),

    #[error("the black box returned no values over the domain")]
    EmptySample,

    #[error("interpolation failed")]
    Interpolation(#[source] InterpError),

    #[error("{points} curve points cannot determine a fit that needs {required}")]
    Underdetermined { points: usize, required: usize },

    #[error("polynomial fit failed")]
    Fit(#[source] FitError),

    #[error("rendering failed")]
    Render(#[source] Box<dyn StdError + Send + Sync>),
}

impl From<SampleError> for PipelineError {
    fn from(err: SampleError) -> Self {
        match err {
            SampleError::Measurement(source) => Self::Transport(source),
            SampleError::Series(source) => Self::InvalidSample(source),
        }
    }
}

impl From<InterpError> for PipelineError {
    fn from(err: InterpError) -> Self {
        match err {
            InterpError::EmptySample => Self::EmptySample,
            other => Self::Interpolation(other),
        }
    }
}

impl From<FitError> for PipelineError {
    fn from(err: FitError) -> Self {
        match err {
            FitError::Underdetermined {
                points, required, ..
            } => Self::Underdetermined { points, required },
            other @ FitError::Algebra(_) => Self::Fit(other),
        }
    }
}

/// Resolution and degree of each stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub probe_count: usize,
    pub dense_count: usize,
    pub degree: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            probe_count: DEFAULT_PROBE_COUNT,
            dense_count: DEFAULT_DENSE_COUNT,
            degree: DEFAULT_DEGREE,
        }
    }
}

/// Builds the pipeline: sample, interpolate, then fit and format.
///
/// Each stage logs its progress at debug level.
pub fn analyzer<C>(
    client: C,
    settings: Settings,
) -> impl Component<Input = Domain, Output = Approximation, Error = PipelineError>
where
    C: Component<Input = f64, Output = Reading>,
{
    let Settings {
        probe_count,
        dense_count,
        degree,
    } = settings;

    let sampler = Sampler::new(client)
        .with_probe_count(probe_count)
        .map_err(PipelineError::from)
        .inspect(
            move |domain: &Domain| log::debug!("sampling {probe_count} probes over {domain}"),
            |sampled: &Sampled| log::debug!("collected {} valid samples", sampled.series.len()),
        );

    let interpolator = Interpolator::new()
        .with_dense_count(dense_count)
        .map_err(PipelineError::from)
        .inspect(
            move |_: &Sampled| log::debug!("interpolating onto {dense_count} points"),
            |curve: &Series| log::debug!("interpolated {} curve points", curve.len()),
        );

    let approximator = Approximator::new()
        .with_degree(degree)
        .map_err(PipelineError::from)
        .inspect(
            move |_: &Series| log::debug!("fitting a degree {degree} polynomial"),
            |approximation: &Approximation| {
                log::debug!(
                    "fit residual (rms) = {:e}",
                    approximation.rms_residual()
                );
            },
        );

    sampler.chain(interpolator).chain(approximator)
}
