mod args;
mod commands;
mod errors;
mod key_file;

use args::Cli;
use clap::Parser;

use std::process::ExitCode;

fn main() -> ExitCode {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::init();

    let cli = Cli::parse();
    match commands::run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
