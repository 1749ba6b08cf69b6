//! Dense reconstruction of a sparse series by piecewise-linear interpolation.

use blackbox_core::{Component, Domain, Series, SeriesError};
use ndarray::Array1;
use ninterp::{
    error::{InterpolateError, ValidateError},
    interpolator::Extrapolate,
    prelude::{Interp1DOwned, Interpolator as _},
    strategy::Linear,
};
use thiserror::Error;

use crate::sampler::Sampled;

/// Number of dense points produced when none is configured.
pub const DEFAULT_DENSE_COUNT: usize = 500;

#[derive(Error, Debug)]
pub enum InterpError {
    #[error("no valid samples to interpolate")]
    EmptySample,
    #[error(transparent)]
    Validation(#[from] ValidateError),
    #[error(transparent)]
    Interpolation(#[from] InterpolateError),
    #[error(transparent)]
    Series(#[from] SeriesError),
}

/// Linear interpolant over a sparse series.
///
/// Points beyond either end of the series take the value of the nearest
/// endpoint. A single-point series is constant everywhere.
enum Interpolant {
    Constant(f64),
    Linear(Interp1DOwned<f64, Linear>),
}

impl Interpolant {
    fn new(sparse: &Series) -> Result<Self, InterpError> {
        match sparse.y() {
            [] => Err(InterpError::EmptySample),
            [y] => Ok(Self::Constant(*y)),
            _ => {
                let x = Array1::from(sparse.x().to_vec());
                let f_x = Array1::from(sparse.y().to_vec());
                Ok(Self::Linear(Interp1DOwned::new(
                    x,
                    f_x,
                    Linear,
                    Extrapolate::Clamp,
                )?))
            }
        }
    }

    fn at(&self, x: f64) -> Result<f64, InterpError> {
        match self {
            Self::Constant(y) => Ok(*y),
            Self::Linear(interp) => interp.interpolate(&[x]).map_err(Into::into),
        }
    }
}

/// Interpolates `sparse` onto `dense_count` evenly spaced points of `domain`.
///
/// # Errors
///
/// Returns [`InterpError::EmptySample`] if `sparse` has no points, or an
/// interpolation error if the sparse grid is rejected.
pub fn interpolate(
    sparse: &Series,
    domain: &Domain,
    dense_count: usize,
) -> Result<Series, InterpError> {
    let interpolant = Interpolant::new(sparse)?;

    let mut dense = Series::with_capacity(dense_count);
    for x in domain.linspace(dense_count) {
        dense.push(x, interpolant.at(x)?)?;
    }

    Ok(dense)
}

/// Turns a [`Sampled`] sparse series into a dense curve over its domain.
#[derive(Debug, Clone, Copy)]
pub struct Interpolator {
    dense_count: usize,
}

impl Interpolator {
    /// Creates an interpolator producing [`DEFAULT_DENSE_COUNT`] points.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dense_count: DEFAULT_DENSE_COUNT,
        }
    }

    #[must_use]
    pub fn with_dense_count(mut self, dense_count: usize) -> Self {
        self.dense_count = dense_count;
        self
    }
}

impl Default for Interpolator {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Interpolator {
    type Input = Sampled;
    type Output = Series;
    type Error = InterpError;

    fn call(&self, input: Self::Input) -> Result<Self::Output, Self::Error> {
        interpolate(&input.series, &input.domain, self.dense_count)
    }
}
