use std::process::ExitCode;

use clap::Args;
use fmeta_protocol::Route;

use crate::commands::{OutputOptions, request_context, run_request};

#[derive(Debug, Args)]
pub struct DirArgs {
    /// Directory to walk
    pub path: String,

    /// Print an indented tree instead of JSON
    #[arg(long)]
    pub tree: bool,
}

pub fn run(args: DirArgs, opts: &OutputOptions) -> ExitCode {
    let ctx = request_context(Route::Directory, &args.path, &[]);
    run_request(opts, &ctx, args.tree)
}
