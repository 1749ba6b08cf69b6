use std::time::Duration;

use argh::FromArgs;
use blackbox_components::client::ClientConfig;
use blackbox_core::{Domain, DomainError};
use log::LevelFilter;
use thiserror::Error;

/// Samples a black-box function through the measurement API and shows a
/// polynomial approximation of it.
#[derive(FromArgs, Debug)]
pub struct Opts {
    /// host name or IP address of the measurement API
    #[argh(option, short = 'i')]
    pub host: String,

    /// port of the measurement API
    #[argh(option, short = 'p', default = "8080")]
    pub port: u16,

    /// lower bound of the sampled domain (x_min)
    #[argh(option, short = 'n', default = "-10.0")]
    pub x_min: f64,

    /// upper bound of the sampled domain (x_max)
    #[argh(option, short = 'x', default = "10.0")]
    pub x_max: f64,

    /// per-request timeout in seconds (waits indefinitely if omitted)
    #[argh(option)]
    pub timeout: Option<f64>,

    /// print the formula without opening the plot window
    #[argh(switch)]
    pub no_plot: bool,

    /// logging level
    #[argh(option, long = "log", default = "LevelFilter::Info")]
    pub log_level: LevelFilter,
}

#[derive(Debug, Error)]
pub enum OptsError {
    #[error("invalid domain")]
    Domain(#[from] DomainError),

    #[error("timeout must be a positive number of seconds, got {0}")]
    Timeout(f64),
}

impl Opts {
    /// Parse options from `env::args`.
    pub fn parse() -> Opts {
        argh::from_env()
    }

    /// The domain `[x_min, x_max]` to sample.
    pub fn domain(&self) -> Result<Domain, OptsError> {
        Ok(Domain::new(self.x_min, self.x_max)?)
    }

    /// Connection settings for the measurement client.
    pub fn client_config(&self) -> Result<ClientConfig, OptsError> {
        let config = ClientConfig::new(self.host.clone(), self.port);

        match self.timeout {
            None => Ok(config),
            Some(secs) => Duration::try_from_secs_f64(secs)
                .ok()
                .filter(|timeout| !timeout.is_zero())
                .map(|timeout| config.with_timeout(timeout))
                .ok_or(OptsError::Timeout(secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Opts, argh::EarlyExit> {
        Opts::from_args(&["blackbox"], args)
    }

    #[test]
    fn defaults_match_the_measurement_api() {
        let opts = parse(&["--host", "localhost"]).unwrap();

        assert_eq!(opts.host, "localhost");
        assert_eq!(opts.port, 8080);
        assert_eq!(opts.domain().unwrap(), Domain::new(-10.0, 10.0).unwrap());
        assert_eq!(opts.timeout, None);
        assert!(!opts.no_plot);
        assert_eq!(opts.log_level, LevelFilter::Info);
    }

    #[test]
    fn short_flags_map_to_bounds() {
        let opts = parse(&["-i", "10.0.0.2", "-p", "9000", "-n", "0", "-x", "2.5"]).unwrap();

        assert_eq!(opts.host, "10.0.0.2");
        assert_eq!(opts.port, 9000);
        assert_eq!(opts.x_min, 0.0);
        assert_eq!(opts.x_max, 2.5);
    }

    #[test]
    fn host_is_required() {
        assert!(parse(&["--port", "8080"]).is_err());
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let opts = parse(&["-i", "localhost", "--x-min", "5", "--x-max", "1"]).unwrap();
        assert!(matches!(opts.domain(), Err(OptsError::Domain(_))));
    }

    #[test]
    fn timeout_must_be_positive() {
        let opts = parse(&["-i", "localhost", "--timeout", "2.5"]).unwrap();
        assert_eq!(
            opts.client_config().unwrap().timeout,
            Some(Duration::from_millis(2500))
        );

        for bad in ["0", "nan"] {
            let opts = parse(&["-i", "localhost", "--timeout", bad]).unwrap();
            assert!(matches!(opts.client_config(), Err(OptsError::Timeout(_))));
        }
    }
}
