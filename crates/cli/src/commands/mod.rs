pub mod dir;
pub mod file;
pub mod list;

use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::{Args, Subcommand};
use fmeta_envelope::{ErrorCatalog, ErrorEnvelope, Params, RequestContext};
use fmeta_protocol::{ApiResponse, PATH_PARAM, Route};
use fmeta_runtime::{DEFAULT_APP_NAME, default_error_codes_path};
use fmeta_service::MetadataService;

pub use dir::DirArgs;
pub use file::FileArgs;
pub use list::ListArgs;

use crate::printer::{ColorChoice, JsonPrinter, RecordPrinter, TreePrinter};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the metadata of a single regular file.
    ///
    /// Example:
    ///   fmeta file /etc/hostname
    File(FileArgs),

    /// Print the full metadata tree of a directory.
    ///
    /// Example:
    ///   fmeta dir --tree ~/projects
    Dir(DirArgs),

    /// Print a flat listing of a directory down to a given depth.
    ///
    /// Example:
    ///   fmeta list --depth 2 /var/log
    List(ListArgs),
}

#[derive(Debug, Args)]
pub struct OutputOptions {
    /// Print JSON on a single line
    #[arg(long, global = true)]
    pub compact: bool,

    /// When to use colors in tree output: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto", global = true)]
    pub color: String,

    /// Error-code message overrides (JSON object of code to template)
    #[arg(long, value_name = "FILE", global = true)]
    pub error_codes: Option<PathBuf>,
}

impl OutputOptions {
    pub fn make_printer(&self, tree: bool) -> Box<dyn RecordPrinter> {
        if tree {
            Box::new(TreePrinter::stdout(ColorChoice::parse(&self.color)))
        } else {
            Box::new(JsonPrinter::stdout(self.compact))
        }
    }

    /// An explicit override file must exist; the default one may not.
    pub fn open_service(&self) -> anyhow::Result<MetadataService> {
        let catalog = match &self.error_codes {
            Some(path) => ErrorCatalog::load(path),
            None => ErrorCatalog::load_or_builtin(&default_error_codes_path()),
        }
        .context("Failed to load error codes")?;

        Ok(MetadataService::new(DEFAULT_APP_NAME, catalog))
    }
}

/// Context for running `route` in-process on `path`.
pub fn request_context(route: Route, path: &str, extra: &[(&str, String)]) -> RequestContext {
    let mut params = Params::new();
    params.insert(PATH_PARAM.to_owned(), vec![path.to_owned()]);
    for (name, value) in extra {
        params.insert((*name).to_owned(), vec![value.clone()]);
    }
    RequestContext::new(route.path(), params)
}

/// Exit status for a failure envelope: 1 for client errors, 2 otherwise.
pub fn exit_code(envelope: &ErrorEnvelope) -> ExitCode {
    if (400..500).contains(&envelope.http_status_code) {
        ExitCode::from(1)
    } else {
        ExitCode::from(2)
    }
}

/// Run one request and print its outcome.
pub fn run_request(opts: &OutputOptions, ctx: &RequestContext, tree: bool) -> ExitCode {
    let service = match opts.open_service() {
        Ok(service) => service,
        Err(e) => {
            eprintln!("[error] {e:#}");
            return ExitCode::from(2);
        }
    };

    let mut printer = opts.make_printer(tree);
    let response = service.serve("GET", ctx);

    let (printed, code) = match &response {
        ApiResponse::Record(record) => (printer.print_record(record), ExitCode::SUCCESS),
        ApiResponse::Listing(records) => (printer.print_listing(records), ExitCode::SUCCESS),
        ApiResponse::Failure(envelope) => (printer.print_failure(envelope), exit_code(envelope)),
        ApiResponse::Health(_) => (Ok(()), ExitCode::SUCCESS),
    };

    match printed {
        Ok(()) => code,
        Err(e) => {
            eprintln!("[error] failed to write output: {e:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
