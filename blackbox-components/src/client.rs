//! Blocking HTTP client for the measurement service.

use std::time::Duration;

use blackbox_core::{Component, MeasurementReply, Reading};
use thiserror::Error;

/// Path of the measurement endpoint on the service.
pub const MEASUREMENT_PATH: &str = "/api/do_measurement";

/// Where the measurement service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to set up the HTTP client")]
    Setup(#[source] reqwest::Error),

    #[error("measurement request for x = {x} failed")]
    Request {
        x: f64,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed measurement reply for x = {x}")]
    Reply {
        x: f64,
        #[source]
        source: reqwest::Error,
    },
}

impl ClientConfig {
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the full URL of the measurement endpoint.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}{MEASUREMENT_PATH}", self.host, self.port)
    }
}

/// Queries the measurement service for one reading at a time.
///
/// Each call issues exactly one blocking `GET` request and returns the
/// service's reading verbatim. Nothing is retried.
#[derive(Debug, Clone)]
pub struct MeasurementClient {
    endpoint: String,
    http: reqwest::blocking::Client,
}

impl MeasurementClient {
    /// Creates a client for the service described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be initialized.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Setup)?;

        Ok(Self {
            endpoint: config.endpoint(),
            http,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the request URL for a query at `x`.
    #[must_use]
    pub fn url(&self, x: f64) -> String {
        format!("{}?x={x}", self.endpoint)
    }

    /// Queries the black box at `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the service answers with a
    /// non-success status, or the body is not a valid measurement reply.
    pub fn query(&self, x: f64) -> Result<Reading, ClientError> {
        let response = self
            .http
            .get(self.url(x))
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|source| ClientError::Request { x, source })?;

        let reply: MeasurementReply = response
            .json()
            .map_err(|source| ClientError::Reply { x, source })?;

        log::trace!("measured x = {}, y = {:?}", reply.data.x, reply.data.y);
        Ok(reply.data)
    }
}

impl Component for MeasurementClient {
    type Input = f64;
    type Output = Reading;
    type Error = ClientError;

    fn call(&self, x: Self::Input) -> Result<Self::Output, Self::Error> {
        self.query(x)
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use super::*;

    #[test]
    fn builds_measurement_urls() {
        let client = MeasurementClient::new(&ClientConfig::new("localhost", 8080)).unwrap();

        assert_eq!(
            client.endpoint(),
            "http://localhost:8080/api/do_measurement"
        );
        assert_eq!(
            client.url(-10.0),
            "http://localhost:8080/api/do_measurement?x=-10"
        );
        assert_eq!(
            client.url(0.25),
            "http://localhost:8080/api/do_measurement?x=0.25"
        );
    }

    #[test]
    fn timeout_is_optional() {
        let config = ClientConfig::new("10.0.0.1", 9000);
        assert_eq!(config.timeout, None);

        let config = config.with_timeout(Duration::from_secs(3));
        assert_eq!(config.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn unreachable_service_is_a_request_error() {
        // Grab a free port, then release it so nothing is listening there.
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let config = ClientConfig::new("127.0.0.1", port).with_timeout(Duration::from_secs(5));
        let client = MeasurementClient::new(&config).unwrap();

        let err = client.call(1.5).unwrap_err();
        assert!(
            matches!(err, ClientError::Request { x, .. } if x == 1.5),
            "unexpected error: {err:?}"
        );
    }
}
