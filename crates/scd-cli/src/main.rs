use scd_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; stderr if the state dir is unusable.
    match logging::init_logging() {
        Ok(path) => tracing::info!("scd logging to {}", path.display()),
        Err(err) => {
            logging::init_logging_stderr();
            tracing::warn!("log file unavailable, using stderr: {:#}", err);
        }
    }

    if let Err(err) = Cli::run_from_args() {
        tracing::error!("scd failed: {:#}", err);
        eprintln!("scd error: {:#}", err);
        std::process::exit(1);
    }
}
