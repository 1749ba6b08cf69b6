use std::{fmt, net::SocketAddr, str::FromStr, sync::mpsc, thread};

use blackbox_core::{MeasurementReply, Reading};
use serde::Deserialize;
use thiserror::Error;
use warp::Filter;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to start the server runtime")]
    Runtime(#[source] std::io::Error),

    #[error("failed to bind the measurement server")]
    Bind(#[source] warp::Error),

    #[error("the server thread exited before reporting its address")]
    Startup,
}

#[derive(Debug, Deserialize)]
struct MeasurementQuery {
    x: f64,
}

/// The measurement endpoint: `GET /api/do_measurement?x=<float>`.
///
/// Replies with `{"data": {"x": x, "y": blackbox(x)}}`, where an absent value
/// is encoded as `null`.
pub fn routes<F>(
    blackbox: F,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone + Send + Sync + 'static
where
    F: Fn(f64) -> Option<f64> + Clone + Send + Sync + 'static,
{
    warp::path!("api" / "do_measurement")
        .and(warp::get())
        .and(warp::query::<MeasurementQuery>())
        .map(move |MeasurementQuery { x }| {
            let reply = MeasurementReply::from(Reading::new(x, blackbox(x)));
            log::trace!("x = {x} -> y = {:?}", reply.data.y);
            warp::reply::json(&reply)
        })
}

/// Serves `blackbox` on `addr` until the process ends.
///
/// # Example
/// ```no_run
/// use blackbox_dev::serve;
///
/// #[tokio::main]
/// async fn main() {
///     serve(|x: f64| Some(x * x), ([127, 0, 0, 1], 8080).into()).await;
/// }
/// ```
pub async fn serve<F>(blackbox: F, addr: SocketAddr)
where
    F: Fn(f64) -> Option<f64> + Clone + Send + Sync + 'static,
{
    log::info!("measurement service running on http://{addr}");
    warp::serve(routes(blackbox)).run(addr).await;
}

/// Starts serving `blackbox` on an ephemeral local port in a background thread.
///
/// Returns once the server is accepting connections. The server lives until
/// the process ends, which suits tests that need a real endpoint.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created or the port cannot be
/// bound.
pub fn spawn<F>(blackbox: F) -> Result<SocketAddr, ServerError>
where
    F: Fn(f64) -> Option<f64> + Clone + Send + Sync + 'static,
{
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = tx.send(Err(ServerError::Runtime(err)));
                return;
            }
        };

        runtime.block_on(async move {
            match warp::serve(routes(blackbox)).try_bind_ephemeral(([127, 0, 0, 1], 0)) {
                Ok((addr, server)) => {
                    let _ = tx.send(Ok(addr));
                    server.await;
                }
                Err(err) => {
                    let _ = tx.send(Err(ServerError::Bind(err)));
                }
            }
        });
    });

    rx.recv().map_err(|_| ServerError::Startup)?
}

/// Built-in black boxes the dev server can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Builtin {
    /// `y = x`
    #[default]
    Identity,
    /// `y = x^2`
    Square,
    /// `y = 2x^3 - 5x + 1`
    Cubic,
    /// `y = sqrt(x)`, absent for negative `x`
    Sqrt,
    /// `y = 1 / x`, absent at zero
    Reciprocal,
    /// Never answers.
    Silent,
}

impl Builtin {
    pub const ALL: [Builtin; 6] = [
        Builtin::Identity,
        Builtin::Square,
        Builtin::Cubic,
        Builtin::Sqrt,
        Builtin::Reciprocal,
        Builtin::Silent,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Identity => "identity",
            Builtin::Square => "square",
            Builtin::Cubic => "cubic",
            Builtin::Sqrt => "sqrt",
            Builtin::Reciprocal => "reciprocal",
            Builtin::Silent => "silent",
        }
    }

    /// Evaluates the black box at `x`.
    #[must_use]
    pub fn eval(self, x: f64) -> Option<f64> {
        match self {
            Builtin::Identity => Some(x),
            Builtin::Square => Some(x * x),
            Builtin::Cubic => Some(2.0 * x.powi(3) - 5.0 * x + 1.0),
            Builtin::Sqrt => (x >= 0.0).then(|| x.sqrt()),
            Builtin::Reciprocal => (x != 0.0).then(|| 1.0 / x),
            Builtin::Silent => None,
        }
    }

    /// Returns the black box as a closure suitable for [`serve`] or [`spawn`].
    #[must_use]
    pub fn into_fn(self) -> impl Fn(f64) -> Option<f64> + Clone + Send + Sync + 'static {
        move |x| self.eval(x)
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown black box `{0}`")]
pub struct UnknownBuiltin(String);

impl FromStr for Builtin {
    type Err = UnknownBuiltin;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Builtin::ALL
            .into_iter()
            .find(|builtin| builtin.name() == s)
            .ok_or_else(|| UnknownBuiltin(s.to_string()))
    }
}
