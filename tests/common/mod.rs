//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use annotated_echo::config::ServerOption;
use annotated_echo::failure::Failure;
use annotated_echo::http::{Server, ServerState};
use annotated_echo::lifecycle::{stop_channel, StopTrigger};
use annotated_echo::routing::RouteTable;
use tokio::task::JoinHandle;

/// A server running on an ephemeral port.
#[allow(dead_code)]
pub struct RunningServer {
    pub addr: SocketAddr,
    pub routes: Arc<RouteTable>,
    pub stop: StopTrigger,
    pub handle: JoinHandle<Result<(), Failure>>,
}

/// Start a server on `127.0.0.1:0` and wait until it is serving.
#[allow(dead_code)]
pub async fn start_server(mut options: Vec<ServerOption>) -> RunningServer {
    options.insert(0, annotated_echo::config::with_addr("127.0.0.1:0"));
    let server = Server::new(options);
    let mut state = server.state();
    let routes = server.routes();

    let (stop, listener) = stop_channel();
    let handle = tokio::spawn(server.serve_until(async move {
        listener.wait().await;
    }));

    let addr = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if let ServerState::Serving { addr } = *state.borrow_and_update() {
                return addr;
            }
            state.changed().await.expect("server dropped before serving");
        }
    })
    .await
    .expect("server did not start");

    RunningServer {
        addr,
        routes,
        stop,
        handle,
    }
}

/// An address nothing is listening on right now.
#[allow(dead_code)]
pub fn unused_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// HTTP client that never pools or proxies.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
