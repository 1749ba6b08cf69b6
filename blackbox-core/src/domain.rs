use std::fmt;

use thiserror::Error;

/// The closed interval `[x_min, x_max]` over which a black box is probed.
///
/// A domain is validated once at construction and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    x_min: f64,
    x_max: f64,
}

/// Errors that can occur when constructing a [`Domain`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum DomainError {
    #[error("domain bounds and width must be finite, got [{x_min}, {x_max}]")]
    NonFinite { x_min: f64, x_max: f64 },

    #[error("x_min must be less than x_max, got [{x_min}, {x_max}]")]
    Empty { x_min: f64, x_max: f64 },
}

impl Domain {
    /// Creates a domain from its lower and upper bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if either bound or the width between them is not finite,
    /// or if `x_min >= x_max`.
    pub fn new(x_min: f64, x_max: f64) -> Result<Self, DomainError> {
        if !x_min.is_finite() || !x_max.is_finite() {
            return Err(DomainError::NonFinite { x_min, x_max });
        }
        if !(x_max - x_min).is_finite() {
            return Err(DomainError::NonFinite { x_min, x_max });
        }
        if x_min >= x_max {
            return Err(DomainError::Empty { x_min, x_max });
        }

        Ok(Self { x_min, x_max })
    }

    #[must_use]
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    #[must_use]
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Returns `true` if `x` lies within the closed interval.
    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        (self.x_min..=self.x_max).contains(&x)
    }

    /// Returns `count` evenly spaced coordinates across the domain.
    ///
    /// The first coordinate is exactly `x_min` and, when `count > 1`, the last
    /// is exactly `x_max`. A count of one yields only `x_min`.
    ///
    /// # Example
    ///
    /// ```
    /// use blackbox_core::Domain;
    ///
    /// let domain = Domain::new(-1.0, 1.0).unwrap();
    /// let xs: Vec<f64> = domain.linspace(5).collect();
    ///
    /// assert_eq!(xs, [-1.0, -0.5, 0.0, 0.5, 1.0]);
    /// ```
    pub fn linspace(&self, count: usize) -> impl ExactSizeIterator<Item = f64> + use<> {
        let Self { x_min, x_max } = *self;
        let last = count.saturating_sub(1);
        #[allow(clippy::cast_precision_loss)]
        let step = if last == 0 {
            0.0
        } else {
            (x_max - x_min) / last as f64
        };

        (0..count).map(move |i| {
            if i == last && i > 0 {
                x_max
            } else {
                #[allow(clippy::cast_precision_loss)]
                let offset = i as f64 * step;
                x_min + offset
            }
        })
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x_min, self.x_max)
    }
}
