use std::process::ExitCode;

use clap::Args;
use fmeta_protocol::Route;

use crate::commands::{OutputOptions, request_context, run_request};

#[derive(Debug, Args)]
pub struct FileArgs {
    /// Path of the file to describe
    pub path: String,
}

pub fn run(args: FileArgs, opts: &OutputOptions) -> ExitCode {
    let ctx = request_context(Route::File, &args.path, &[]);
    run_request(opts, &ctx, false)
}
