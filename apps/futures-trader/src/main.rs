//! Binary entry point.

use std::process::ExitCode;

use clap::Parser;

use futures_trader::cli::{self, Cli};
use futures_trader::logging;

#[tokio::main]
async fn main() -> ExitCode {
    // Optional .env in the working directory; absence is not an error.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = logging::init(cli.verbose);

    tokio::select! {
        result = cli::run(cli) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {e:#}");
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            println!("\ninterrupted");
            ExitCode::SUCCESS
        }
    }
}
