use ooni_dl_core::logging;
use ooni_dl_core::WalkError;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; fall back to stderr if the
    // state directory is unusable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = Cli::run_from_args() {
        match err.downcast_ref::<WalkError>() {
            Some(WalkError::Fetch(exhausted)) => eprintln!("{exhausted}"),
            _ => eprintln!("ooni-dl error: {:#}", err),
        }
        std::process::exit(1);
    }
}
