use std::error::Error as StdError;
use std::process::ExitCode;

use blackbox_components::{
    approximation::Approximation,
    client::{ClientError, MeasurementClient},
    pipeline::{self, PipelineError, Settings},
};
use blackbox_core::Component;
use blackbox_plot::Presenter;
use thiserror::Error;

mod opts;

use opts::{Opts, OptsError};

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Opts(#[from] OptsError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Formats an error together with its chain of sources.
fn describe(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn run(opts: &Opts) -> Result<(), RunError> {
    let domain = opts.domain()?;
    let client = MeasurementClient::new(&opts.client_config()?)?;
    log::info!("sampling {domain} from {}", client.endpoint());

    let analyzer = pipeline::analyzer(client, Settings::default()).inspect(
        |_| {},
        |approximation: &Approximation| println!("{}", approximation.formula),
    );

    if opts.no_plot {
        analyzer.call(domain)?;
    } else {
        let presenter = Presenter.map_err(|err| PipelineError::Render(Box::new(err)));
        analyzer.chain(presenter).call(domain)?;
    }

    Ok(())
}

fn main() -> ExitCode {
    let opts = Opts::parse();

    env_logger::Builder::new()
        .filter_level(opts.log_level)
        .init();

    match run(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", describe(&err));

            ExitCode::FAILURE
        }
    }
}
