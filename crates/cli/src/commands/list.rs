use std::process::ExitCode;

use clap::Args;
use fmeta_protocol::{DEFAULT_LIST_DEPTH, DEPTH_PARAM, Route};

use crate::commands::{OutputOptions, request_context, run_request};

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Directory to list
    pub path: String,

    /// Levels below the directory to include
    #[arg(long, short = 'd', default_value_t = DEFAULT_LIST_DEPTH)]
    pub depth: usize,
}

pub fn run(args: ListArgs, opts: &OutputOptions) -> ExitCode {
    let ctx = request_context(
        Route::List,
        &args.path,
        &[(DEPTH_PARAM, args.depth.to_string())],
    );
    run_request(opts, &ctx, false)
}
