//! ags_provision - installs the AGS editor on macOS under Wine.
//!
//! Exit codes: 0 on success, 1 on any fatal stage failure or a declined
//! prompt, 130 when interrupted.

use std::process;

use ags_provision::cli;

/// Conventional exit status for SIGINT.
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Dropping the pipeline future on Ctrl-C runs every cleanup guard.
    let exit_code = tokio::select! {
        result = cli::run() => match result {
            Ok(code) => code,
            Err(e) if e.is_interrupted() => {
                eprintln!("Interrupted");
                EXIT_INTERRUPTED
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nInterrupted, cleaning up");
            EXIT_INTERRUPTED
        }
    };

    process::exit(exit_code);
}
