//! Fitting a fixed-degree polynomial to the dense curve.

use blackbox_core::{Component, Series};

use crate::polynomial::{FitError, Polynomial, fit, format_formula};

/// Polynomial degree used when none is configured.
pub const DEFAULT_DEGREE: usize = 10;

/// The dense curve together with its fitted polynomial and formula.
#[derive(Debug, Clone, PartialEq)]
pub struct Approximation {
    pub curve: Series,
    pub polynomial: Polynomial,
    pub formula: String,
}

impl Approximation {
    /// Root-mean-square difference between the curve and the polynomial.
    #[must_use]
    pub fn rms_residual(&self) -> f64 {
        if self.curve.is_empty() {
            return 0.0;
        }

        let sum: f64 = self
            .curve
            .points()
            .map(|[x, y]| (self.polynomial.evaluate(x) - y).powi(2))
            .sum();

        #[allow(clippy::cast_precision_loss)]
        let count = self.curve.len() as f64;
        (sum / count).sqrt()
    }
}

/// Fits a polynomial of `degree` to `dense` and renders its formula.
///
/// # Errors
///
/// Returns an error if the fit is underdetermined or the solve fails.
pub fn fit_and_format(dense: &Series, degree: usize) -> Result<(Polynomial, String), FitError> {
    let polynomial = fit(dense, degree)?;
    let formula = format_formula(&polynomial);
    Ok((polynomial, formula))
}

/// Turns a dense curve into an [`Approximation`].
#[derive(Debug, Clone, Copy)]
pub struct Approximator {
    degree: usize,
}

impl Approximator {
    /// Creates an approximator fitting polynomials of [`DEFAULT_DEGREE`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            degree: DEFAULT_DEGREE,
        }
    }

    #[must_use]
    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }
}

impl Default for Approximator {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Approximator {
    type Input = Series;
    type Output = Approximation;
    type Error = FitError;

    fn call(&self, curve: Self::Input) -> Result<Self::Output, Self::Error> {
        let (polynomial, formula) = fit_and_format(&curve, self.degree)?;
        Ok(Approximation {
            curve,
            polynomial,
            formula,
        })
    }
}
