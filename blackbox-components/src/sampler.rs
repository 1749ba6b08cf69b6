//! Probing a domain for valid readings.

use std::error::Error as StdError;

use blackbox_core::{Component, Domain, Reading, Series, SeriesError};
use thiserror::Error;

/// Number of probes used when none is configured.
pub const DEFAULT_PROBE_COUNT: usize = 100;

/// Errors that can occur while sampling a domain.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("measurement failed")]
    Measurement(#[source] Box<dyn StdError + Send + Sync>),

    #[error("measurement service returned an invalid coordinate")]
    Series(#[from] SeriesError),
}

/// The sparse series of valid readings and the domain it was taken from.
#[derive(Debug, Clone, PartialEq)]
pub struct Sampled {
    pub domain: Domain,
    pub series: Series,
}

/// Probes `probe_count` evenly spaced points of `domain` and keeps the
/// readings that carry a value.
///
/// Probes are issued strictly in order, one blocking query at a time. Readings
/// without a value are dropped, so the result may be shorter than
/// `probe_count`, or empty if the black box never answered.
///
/// The `x` of each kept point is the coordinate echoed by the service.
///
/// # Errors
///
/// Returns an error as soon as a query fails, or if the echoed coordinates are
/// not strictly increasing.
pub fn sample<C>(client: &C, domain: &Domain, probe_count: usize) -> Result<Series, SampleError>
where
    C: Component<Input = f64, Output = Reading>,
{
    let mut series = Series::with_capacity(probe_count);
    let mut discarded = 0usize;

    for x in domain.linspace(probe_count) {
        let reading = client
            .call(x)
            .map_err(|err| SampleError::Measurement(Box::new(err)))?;

        match reading.point() {
            Some((x, y)) => series.push(x, y)?,
            None => discarded += 1,
        }
    }

    log::debug!(
        "kept {} of {probe_count} probes over {domain} ({discarded} without a value)",
        series.len(),
    );

    Ok(series)
}

/// Samples a domain through a measurement client.
///
/// Takes a [`Domain`] and produces the [`Sampled`] sparse series.
#[derive(Debug, Clone)]
pub struct Sampler<C> {
    client: C,
    probe_count: usize,
}

impl<C> Sampler<C>
where
    C: Component<Input = f64, Output = Reading>,
{
    /// Creates a sampler that probes [`DEFAULT_PROBE_COUNT`] points.
    pub fn new(client: C) -> Self {
        Self {
            client,
            probe_count: DEFAULT_PROBE_COUNT,
        }
    }

    #[must_use]
    pub fn with_probe_count(mut self, probe_count: usize) -> Self {
        self.probe_count = probe_count;
        self
    }
}

impl<C> Component for Sampler<C>
where
    C: Component<Input = f64, Output = Reading>,
{
    type Input = Domain;
    type Output = Sampled;
    type Error = SampleError;

    fn call(&self, domain: Self::Input) -> Result<Self::Output, Self::Error> {
        let series = sample(&self.client, &domain, self.probe_count)?;
        Ok(Sampled { domain, series })
    }
}
