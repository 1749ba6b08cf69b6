use thiserror::Error;

/// An ordered coordinate series with strictly increasing `x`.
///
/// The pipeline works with two series: the sparse series of valid samples and
/// the dense, evenly spaced series produced by interpolation. Both hold `x`
/// and `y` in parallel vectors so they can be handed to numeric routines
/// without reshaping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    x: Vec<f64>,
    y: Vec<f64>,
}

/// Errors that can occur when extending a [`Series`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SeriesError {
    #[error("x must be strictly increasing: {x} does not follow {last}")]
    NotIncreasing { last: f64, x: f64 },

    #[error("x must be a number")]
    NotANumber,
}

impl Series {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
        }
    }

    /// Builds a series from `(x, y)` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if the pairs are not strictly increasing in `x`.
    pub fn from_points<I>(points: I) -> Result<Self, SeriesError>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut series = Self::new();
        for (x, y) in points {
            series.push(x, y)?;
        }
        Ok(series)
    }

    /// Appends a point to the end of the series.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` is NaN or does not exceed the last `x`.
    pub fn push(&mut self, x: f64, y: f64) -> Result<(), SeriesError> {
        if x.is_nan() {
            return Err(SeriesError::NotANumber);
        }
        if let Some(&last) = self.x.last() {
            if x <= last {
                return Err(SeriesError::NotIncreasing { last, x });
            }
        }

        self.x.push(x);
        self.y.push(y);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Iterates over the series as `[x, y]` pairs.
    pub fn points(&self) -> impl ExactSizeIterator<Item = [f64; 2]> + '_ {
        self.x.iter().zip(&self.y).map(|(&x, &y)| [x, y])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_increasing_points() {
        let series = Series::from_points([(0.0, 1.0), (0.5, 2.0), (2.0, -1.0)]).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.x(), [0.0, 0.5, 2.0]);
        assert_eq!(series.y(), [1.0, 2.0, -1.0]);
        assert_eq!(
            series.points().collect::<Vec<_>>(),
            [[0.0, 1.0], [0.5, 2.0], [2.0, -1.0]]
        );
    }

    #[test]
    fn rejects_repeated_or_decreasing_x() {
        let mut series = Series::new();
        series.push(1.0, 0.0).unwrap();

        assert_eq!(
            series.push(1.0, 5.0),
            Err(SeriesError::NotIncreasing { last: 1.0, x: 1.0 })
        );
        assert_eq!(
            series.push(0.5, 5.0),
            Err(SeriesError::NotIncreasing { last: 1.0, x: 0.5 })
        );
        assert_eq!(series.push(f64::NAN, 5.0), Err(SeriesError::NotANumber));
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn empty_series() {
        let series = Series::new();
        assert!(series.is_empty());
        assert_eq!(series.points().count(), 0);
        assert!(series.x().is_empty() && series.y().is_empty());
    }
}
