use std::sync::Arc;

mod config;
mod http;
mod state;

use config::DaemonConfig;
use fmeta_runtime::logging;
use state::DaemonState;

use log::info;

fn main() -> anyhow::Result<()> {
    logging::init().ok();

    let config = DaemonConfig::from_env()?;

    info!(
        "Starting fmeta daemon: addr={}, app={}, workers={}",
        config.bind_addr(),
        config.app_name,
        config.workers,
    );

    let state = Arc::new(DaemonState::new(config)?);
    http::run_http_server(state)
}
