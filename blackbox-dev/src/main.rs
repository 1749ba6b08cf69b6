use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use argh::FromArgs;
use blackbox_dev::{Builtin, serve};
use log::LevelFilter;

/// Mock measurement service exposing a built-in black box.
#[derive(FromArgs)]
struct Opts {
    /// port to listen on
    #[argh(option, short = 'p', default = "8080")]
    port: u16,

    /// black box to serve: identity, square, cubic, sqrt, reciprocal or silent
    #[argh(option, short = 'f', default = "Builtin::default()")]
    function: Builtin,

    /// logging level
    #[argh(option, long = "log", default = "LevelFilter::Info")]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() {
    let opts: Opts = argh::from_env();

    env_logger::Builder::new()
        .filter_level(opts.log_level)
        .init();

    let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), opts.port);
    log::info!("serving the `{}` black box", opts.function);

    serve(opts.function.into_fn(), addr).await;
}
