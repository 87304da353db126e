//! Named-route echo server.
//!
//! Serves every configured route until SIGINT, SIGTERM or SIGSEGV arrives,
//! or until serving fails, then prints the trigger and exits.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use annotated_echo::config::{
    load_config, with_addr, with_service, ServerOption, DEFAULT_ADDR,
};
use annotated_echo::http::{EchoService, Server};
use annotated_echo::lifecycle::{signals, stop_channel, stop_on_failure};
use annotated_echo::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "annotated-echo")]
#[command(about = "Echo server with named routes", long_about = None)]
struct Cli {
    /// Bind address; `:PORT` means all interfaces.
    #[arg(short, long, default_value = DEFAULT_ADDR)]
    addr: String,

    /// TOML configuration file; replaces --addr and --route.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Route name served by the echo handler. Repeatable.
    #[arg(short, long = "route", default_value = "echo")]
    routes: Vec<String>,

    /// Log level used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Expose Prometheus metrics on this address.
    #[arg(long)]
    metrics_addr: Option<SocketAddr>,
}

impl Cli {
    fn options(&self) -> Result<Vec<ServerOption>, Box<dyn std::error::Error>> {
        if let Some(path) = &self.config {
            return Ok(load_config(path)?.into_options());
        }
        let mut options = vec![with_addr(self.addr.clone())];
        options.extend(self.routes.iter().map(|name| with_service(name.clone(), EchoService)));
        Ok(options)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    if let Some(addr) = cli.metrics_addr {
        metrics::init_metrics(addr)?;
    }

    let server = Server::new(cli.options()?);
    tracing::info!(
        addr = %server.config().addr(),
        routes = ?server.routes(),
        "Configuration loaded"
    );

    let (trigger, stop) = stop_channel();
    let os_signals = signals::listen();

    let serving = tokio::spawn(server.serve());
    tokio::spawn(stop_on_failure(serving, trigger.clone()));
    tokio::spawn(os_signals.forward(trigger));

    let sig = stop.wait().await;
    println!("server exit, sig: {sig}");
    Ok(())
}
