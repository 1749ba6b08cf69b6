//! Least-squares polynomial fitting and formula rendering.

use std::fmt;

use blackbox_core::Series;
use nalgebra::{DMatrix, DVector, SVD};
use thiserror::Error;

/// Errors that can occur when fitting a polynomial.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FitError {
    #[error("a degree {degree} fit needs at least {required} points, got {points}")]
    Underdetermined {
        degree: usize,
        points: usize,
        required: usize,
    },

    #[error("least-squares solve failed: {0}")]
    Algebra(&'static str),
}

/// A polynomial with coefficients ordered from the highest power down to the
/// constant term.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Creates a polynomial from coefficients ordered highest power first.
    ///
    /// An empty coefficient list is treated as the zero polynomial of degree 0.
    #[must_use]
    pub fn new(coefficients: Vec<f64>) -> Self {
        if coefficients.is_empty() {
            return Self {
                coefficients: vec![0.0],
            };
        }
        Self { coefficients }
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Evaluates the polynomial at `x` using Horner's scheme.
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
    }

    /// Iterates over `(exponent, coefficient)` pairs from the highest power down.
    pub fn terms(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        let degree = self.degree();
        self.coefficients
            .iter()
            .enumerate()
            .map(move |(i, &c)| (degree - i, c))
    }
}

/// Renders the polynomial in its integer-rounded formula form.
impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_formula(self))
    }
}

/// Fits a polynomial of the given `degree` to `series` by least squares.
///
/// The Vandermonde matrix is column-scaled before an SVD solve, and singular
/// values below `points * f64::EPSILON` relative to the largest are treated
/// as zero.
///
/// # Errors
///
/// Returns [`FitError::Underdetermined`] if the series has fewer than
/// `degree + 1` points, or [`FitError::Algebra`] if the solve fails.
pub fn fit(series: &Series, degree: usize) -> Result<Polynomial, FitError> {
    let points = series.len();
    let required = degree + 1;
    if points < required {
        return Err(FitError::Underdetermined {
            degree,
            points,
            required,
        });
    }

    let x = series.x();
    let exponent = |column: usize| i32::try_from(degree - column).unwrap_or(i32::MAX);
    let mut lhs = DMatrix::from_fn(points, required, |row, column| {
        x[row].powi(exponent(column))
    });
    let rhs = DVector::from_column_slice(series.y());

    let scales: Vec<f64> = lhs
        .column_iter()
        .map(|column| {
            let norm = column.norm();
            if norm > 0.0 { norm } else { 1.0 }
        })
        .collect();
    for (mut column, &scale) in lhs.column_iter_mut().zip(&scales) {
        column /= scale;
    }

    let svd = SVD::new(lhs, true, true);
    #[allow(clippy::cast_precision_loss)]
    let cutoff = points as f64 * f64::EPSILON * svd.singular_values.max();
    let solution = svd.solve(&rhs, cutoff).map_err(FitError::Algebra)?;

    let coefficients = solution
        .iter()
        .zip(&scales)
        .map(|(c, scale)| c / scale)
        .collect();

    Ok(Polynomial::new(coefficients))
}

/// Renders `polynomial` as `"y = <terms>"`.
///
/// Each coefficient is rounded to the nearest integer, ties to even. Terms
/// that round to zero are omitted, the rest are joined with `" + "` from the
/// highest power down. Negative coefficients are not special-cased, so a term
/// may read `+ -3x^4`. If every term is omitted the result is `"y = "`.
///
/// # Example
///
/// ```
/// use blackbox_components::polynomial::{Polynomial, format_formula};
///
/// let p = Polynomial::new(vec![3.2, 0.0, -1.6, 0.4]);
/// assert_eq!(format_formula(&p), "y = 3x^3 + -2x^1");
/// ```
#[must_use]
pub fn format_formula(polynomial: &Polynomial) -> String {
    let terms: Vec<String> = polynomial
        .terms()
        .filter_map(|(exponent, coefficient)| {
            let rounded = coefficient.round_ties_even();
            if rounded == 0.0 {
                return None;
            }
            Some(if exponent == 0 {
                format!("{rounded:.0}")
            } else {
                format!("{rounded:.0}x^{exponent}")
            })
        })
        .collect();

    format!("y = {}", terms.join(" + "))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn series_of(f: impl Fn(f64) -> f64, x_min: f64, x_max: f64, count: usize) -> Series {
        let domain = blackbox_core::Domain::new(x_min, x_max).unwrap();
        Series::from_points(domain.linspace(count).map(|x| (x, f(x)))).unwrap()
    }

    #[test]
    fn formats_rounded_terms() {
        let p = Polynomial::new(vec![3.2, 0.0, -1.6, 0.4]);
        assert_eq!(format_formula(&p), "y = 3x^3 + -2x^1");
    }

    #[test]
    fn formats_constant_without_exponent() {
        let p = Polynomial::new(vec![1.0, -0.2, 4.6]);
        assert_eq!(format_formula(&p), "y = 1x^2 + 5");
    }

    #[test]
    fn formats_all_zero_as_empty_body() {
        let p = Polynomial::new(vec![0.4, -0.3, 0.0, 0.49]);
        assert_eq!(format_formula(&p), "y = ");
        assert_eq!(p.to_string(), "y = ");
    }

    #[test]
    fn rounds_half_to_even() {
        let p = Polynomial::new(vec![2.5, 0.5, -1.5, -0.5]);
        assert_eq!(format_formula(&p), "y = 2x^3 + -2x^1");
    }

    #[test]
    fn formats_large_coefficients_as_integers() {
        let p = Polynomial::new(vec![12_345_678.9, 0.0]);
        assert_eq!(format_formula(&p), "y = 12345679x^1");
    }

    #[test]
    fn evaluates_with_horner() {
        let p = Polynomial::new(vec![2.0, -3.0, 0.0, 5.0]);
        assert_eq!(p.degree(), 3);
        assert_relative_eq!(p.evaluate(0.0), 5.0);
        assert_relative_eq!(p.evaluate(2.0), 9.0);
        assert_relative_eq!(p.evaluate(-1.0), 0.0);
    }

    #[test]
    fn fits_exact_polynomial() {
        let series = series_of(|x| 3.0 * x.powi(3) - 2.0 * x + 7.0, -2.0, 2.0, 50);
        let p = fit(&series, 3).unwrap();

        let expected = [3.0, 0.0, -2.0, 7.0];
        assert_eq!(p.coefficients().len(), 4);
        for (actual, expected) in p.coefficients().iter().zip(expected) {
            assert_relative_eq!(*actual, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn degree_ten_fit_of_a_line() {
        let series = series_of(|x| x, -10.0, 10.0, 500);
        let p = fit(&series, 10).unwrap();

        assert_eq!(p.degree(), 10);
        assert_relative_eq!(p.coefficients()[9], 1.0, epsilon = 1e-6);
        assert_eq!(format_formula(&p), "y = 1x^1");
    }

    #[test]
    fn fit_minimizes_squared_error() {
        // Best constant fit is the mean.
        let series = Series::from_points([(0.0, 1.0), (1.0, 3.0), (2.0, 2.0)]).unwrap();
        let p = fit(&series, 0).unwrap();
        assert_relative_eq!(p.coefficients()[0], 2.0, epsilon = 1e-12);

        // Best line through points symmetric about x = 1.
        let series = Series::from_points([(0.0, 0.0), (1.0, 2.0), (2.0, 2.0)]).unwrap();
        let p = fit(&series, 1).unwrap();
        assert_relative_eq!(p.coefficients()[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.coefficients()[1], 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn too_few_points_is_underdetermined() {
        let series = series_of(|x| x, 0.0, 1.0, 10);
        assert_eq!(
            fit(&series, 10),
            Err(FitError::Underdetermined {
                degree: 10,
                points: 10,
                required: 11,
            })
        );
    }
}
