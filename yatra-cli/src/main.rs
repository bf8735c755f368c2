//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use yatra_cli::CliError;

fn main() {
    match yatra_cli::run() {
        Ok(()) => {}
        // Clap renders help, version and usage errors itself.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("yatra: {err}");
            std::process::exit(1);
        }
    }
}
