#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

/// A single answer from the measurement service.
///
/// `y` is `None` when the service declined to answer for `x`, for example
/// because the black box is undefined there.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub struct Reading {
    pub x: f64,
    pub y: Option<f64>,
}

/// The JSON envelope of a measurement reply: `{"data": {"x": .., "y": ..}}`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub struct MeasurementReply {
    pub data: Reading,
}

impl Reading {
    #[must_use]
    pub fn new(x: f64, y: Option<f64>) -> Self {
        Self { x, y }
    }

    /// Returns the `(x, y)` pair if the reading carries a value.
    #[must_use]
    pub fn point(&self) -> Option<(f64, f64)> {
        self.y.map(|y| (self.x, y))
    }
}

impl From<Reading> for MeasurementReply {
    fn from(data: Reading) -> Self {
        Self { data }
    }
}
