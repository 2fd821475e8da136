use std::{path::PathBuf, thread};

use anyhow::{Context, Result};
use clap::Parser;
use fmeta_runtime::{
    APP_NAME_ENV, DEFAULT_APP_NAME, DEFAULT_HOST, DEFAULT_PORT, ERROR_CODES_ENV, HOST_ENV,
    PORT_ENV, WORKERS_ENV,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonConfig {
    pub host: String,
    pub port: u16,
    /// Reported as `applicationName` in error envelopes
    pub app_name: String,
    /// Explicit catalog override file; `None` means the default location
    pub error_codes: Option<PathBuf>,
    pub workers: usize,
}

#[derive(Debug, Parser)]
#[command(name = "fmeta-daemon", version, about = "File metadata HTTP service")]
pub struct Cli {
    /// Address to bind [env: FMETA_HOST]
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on [env: FMETA_PORT]
    #[arg(long)]
    pub port: Option<u16>,

    /// Application name reported in error responses [env: FMETA_APP_NAME]
    #[arg(long)]
    pub app_name: Option<String>,

    /// Error-code message overrides [env: FMETA_ERROR_CODES]
    #[arg(long, value_name = "FILE")]
    pub error_codes: Option<PathBuf>,

    /// Worker threads serving requests [env: FMETA_WORKERS]
    #[arg(long)]
    pub workers: Option<usize>,
}

fn default_workers() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

impl DaemonConfig {
    /// Flags win over the environment, which wins over defaults.
    pub fn from_args<F>(args: &Cli, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |name: &str| env(name).filter(|v| !v.trim().is_empty());

        let host = args
            .host
            .clone()
            .or_else(|| env(HOST_ENV))
            .unwrap_or_else(|| DEFAULT_HOST.to_owned());

        let port = match args.port {
            Some(port) => port,
            None => match env(PORT_ENV) {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid {PORT_ENV} value {raw:?}"))?,
                None => DEFAULT_PORT,
            },
        };

        let app_name = args
            .app_name
            .clone()
            .or_else(|| env(APP_NAME_ENV))
            .unwrap_or_else(|| DEFAULT_APP_NAME.to_owned());

        let error_codes = args
            .error_codes
            .clone()
            .or_else(|| env(ERROR_CODES_ENV).map(PathBuf::from));

        let workers = match args.workers {
            Some(n) => n,
            None => match env(WORKERS_ENV) {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid {WORKERS_ENV} value {raw:?}"))?,
                None => default_workers(),
            },
        }
        .max(1);

        Ok(Self {
            host,
            port,
            app_name,
            error_codes,
            workers,
        })
    }

    pub fn from_env() -> Result<Self> {
        let args = Cli::parse();
        Self::from_args(&args, |name| std::env::var(name).ok())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
