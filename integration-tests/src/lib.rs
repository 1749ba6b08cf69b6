//! Helpers for running the pipeline against a live mock measurement service.

use std::net::SocketAddr;

use blackbox_components::client::{ClientConfig, MeasurementClient};

/// Spawns a mock service for `blackbox` and returns a client connected to it.
///
/// # Panics
///
/// Panics if the server cannot be started or the client cannot be built.
pub fn serve_and_connect<F>(blackbox: F) -> (SocketAddr, MeasurementClient)
where
    F: Fn(f64) -> Option<f64> + Clone + Send + Sync + 'static,
{
    let addr = blackbox_dev::spawn(blackbox).expect("mock service should start");
    let config = ClientConfig::new(addr.ip().to_string(), addr.port());
    let client = MeasurementClient::new(&config).expect("client should build");
    (addr, client)
}
