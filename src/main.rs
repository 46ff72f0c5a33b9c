//! Pickline - interactive picker
//!
//! Prompts the user with a restricted, cycling completion UI over a
//! candidate list and prints the selection to stdout. Requests the
//! restricted engine cannot represent fall back to standard readline
//! completion with the original arguments, as does the Ctrl-F/Ctrl-B
//! gesture at the buffer edge.
//!
//! # Usage
//!
//! ```bash
//! # Pick from a word list, requiring a listed value
//! pickline words.txt --require-match
//!
//! # Ordered defaults surface at the top of the candidate list
//! pickline words.txt -d main -d dev
//! ```

use std::process;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use pickline::adapter::CompletionAdapter;
use pickline::cli::CliInterface;
use pickline::error::{PicklineError, Result};

/// Application entry point
fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Main application logic
///
/// This function orchestrates the application startup:
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Handle subcommands or run the prompt
///
/// # Returns
/// * `Result<i32>` - Process exit code or error
fn run() -> Result<i32> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    // Handle subcommands (version, completion, config)
    if cli.handle_subcommand()? {
        return Ok(0);
    }

    cli.print_banner();

    let request = cli.build_request()?;
    let mut adapter = CompletionAdapter::new(cli.config());

    match adapter.read_with_completion(&request) {
        Ok(selection) => {
            println!("{selection}");
            Ok(0)
        }
        // Cancellation is not a failure; exit like an interrupted shell
        Err(PicklineError::Interrupted) | Err(PicklineError::Eof) => Ok(130),
        Err(e) => Err(e),
    }
}

/// Initialize logging based on verbosity and configuration
fn initialize_logging(cli: &CliInterface) {
    let level = cli.log_level();
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
