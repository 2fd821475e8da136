use std::process::ExitCode;

use clap::Parser;

mod commands;
mod printer;

use commands::{Command, OutputOptions};
use fmeta_runtime::logging;

#[derive(Debug, Parser)]
#[command(
    name = "fmeta",
    version,
    about = "Inspect file and directory metadata",
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub output: OutputOptions,
}

fn main() -> ExitCode {
    logging::init_if_configured().ok();

    let cli = Cli::parse();
    match cli.command {
        Command::File(args) => commands::file::run(args, &cli.output),
        Command::Dir(args) => commands::dir::run(args, &cli.output),
        Command::List(args) => commands::list::run(args, &cli.output),
    }
}
