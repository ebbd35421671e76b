use clap::Parser;
use dci_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    // Parse first: -v decides the log level.
    let cli = Cli::parse();

    if let Err(err) = logging::init_logging(cli.verbose()) {
        eprintln!("dci: {:#}", err);
    }

    if let Err(err) = cli::run(cli).await {
        eprintln!("dci error: {:#}", err);
        std::process::exit(1);
    }
}
