use std::{
    io::Cursor,
    panic::{AssertUnwindSafe, catch_unwind},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::Duration,
};

use anyhow::{Context, anyhow};
use crossbeam::channel::{self, Receiver};
use fmeta_envelope::Failure;
use fmeta_protocol::{ApiResponse, CONTENT_TYPE_JSON, CORS_HEADER, context_for};
use log::{debug, error, info, warn};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::flag;
use tiny_http::{Header, Request, Response, Server};

use crate::state::DaemonState;

/// How long the accept loop waits before re-checking the shutdown flag.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

const SERIALIZATION_FAILURE: &[u8] = br#"{"appErrorCode":"INTERNAL_SERVER_ERROR"}"#;

pub fn run_http_server(state: Arc<DaemonState>) -> anyhow::Result<()> {
    let shutdown = Arc::new(AtomicBool::new(false));

    // Register signal handlers. They only set the atomic flag
    for sig in [SIGINT, SIGTERM] {
        flag::register(sig, Arc::clone(&shutdown))
            .with_context(|| format!("Failed to register signal handler for {sig}"))?;
    }

    let addr = state.config.bind_addr();
    let server = Server::http(&addr).map_err(|e| anyhow!("Failed to bind {addr}: {e}"))?;

    info!(
        "fmeta daemon listening on {addr} with {} worker(s)",
        state.config.workers
    );

    serve(server, state, &shutdown);

    info!("HTTP server shutdown complete.");
    Ok(())
}

/// Accept requests until `shutdown` is set, handing each to the worker pool.
///
/// Requests already queued are answered before this returns.
pub fn serve(server: Server, state: Arc<DaemonState>, shutdown: &AtomicBool) {
    let (tx, rx) = channel::unbounded::<Request>();
    let workers = state.config.workers.max(1);

    thread::scope(|s| {
        for _ in 0..workers {
            let rx = rx.clone();
            let state = Arc::clone(&state);
            s.spawn(move || worker_loop(&rx, &state));
        }

        loop {
            if shutdown.load(Ordering::Relaxed) {
                info!("Shutdown signal observed; stopping HTTP server.");
                break;
            }

            match server.recv_timeout(POLL_INTERVAL) {
                Ok(Some(request)) => {
                    if tx.send(request).is_err() {
                        error!("All workers exited; stopping HTTP server.");
                        break;
                    }
                }
                Ok(None) => continue,
                Err(err) => {
                    error!("Accept error: {err}");
                    continue;
                }
            }
        }

        // Workers drain the queue, then see the channel close.
        drop(tx);
    });
}

fn worker_loop(rx: &Receiver<Request>, state: &DaemonState) {
    for request in rx.iter() {
        handle_request(request, state);
    }
}

fn handle_request(request: Request, state: &DaemonState) {
    let method = request.method().as_str().to_owned();
    let url = request.url().to_owned();

    let response = guarded(state, &url, || state.service.dispatch(&method, &url));
    let status = response.status_code();
    debug!("{method} {url} -> {status}");

    if let Err(err) = request.respond(to_http(&response)) {
        warn!("Failed to send response for {method} {url}: {err}");
    }
}

/// Run `handler`, answering a panic with an internal-error envelope for `url`.
fn guarded(
    state: &DaemonState,
    url: &str,
    handler: impl FnOnce() -> ApiResponse,
) -> ApiResponse {
    match catch_unwind(AssertUnwindSafe(handler)) {
        Ok(response) => response,
        Err(_) => {
            error!("Request handler panicked for {url}");
            state.service.fail(
                &Failure::internal("request handler panicked"),
                &context_for(url),
            )
        }
    }
}

/// Encode `response` as a JSON HTTP response with the standard headers.
pub fn to_http(response: &ApiResponse) -> Response<Cursor<Vec<u8>>> {
    let (status, body) = match response.to_json(true) {
        Ok(body) => (response.status_code(), body),
        Err(err) => {
            error!("Failed to encode response: {err:#}");
            (500, SERIALIZATION_FAILURE.to_vec())
        }
    };

    let mut http = Response::from_data(body).with_status_code(status);
    for (name, value) in [CONTENT_TYPE_JSON, CORS_HEADER] {
        match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            Ok(header) => http = http.with_header(header),
            Err(()) => warn!("Invalid header {name}: {value}"),
        }
    }
    http
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
