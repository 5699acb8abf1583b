//! Fairdice terminal game
//!
//! Takes the dice set as command-line arguments (one comma-separated face
//! list per die) and plays one provably-fair game on stdin/stdout.

use fairdice_core::{parse_dice, GameSession, SessionEnd, SystemEntropy};
use std::io;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const USAGE_EXAMPLE: &str = "Example: fairdice 2,2,4,4,9,9 1,1,6,6,8,8 3,3,5,5,7,7";

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the game protocol.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let specs: Vec<String> = std::env::args().skip(1).collect();
    let dice = match parse_dice(&specs) {
        Ok(dice) => dice,
        Err(err) => {
            eprintln!("Error: {err}");
            eprintln!("{USAGE_EXAMPLE}");
            return ExitCode::FAILURE;
        }
    };
    info!(dice = dice.len(), "starting game");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let session = GameSession::new(dice, SystemEntropy::new(), stdin.lock(), stdout.lock());
    match session.run() {
        Ok(SessionEnd::Completed(_)) | Ok(SessionEnd::Exited) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "game aborted");
            eprintln!("Fatal: {err}");
            ExitCode::FAILURE
        }
    }
}
