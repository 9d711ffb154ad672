//! Interactive confirmation on the controlling terminal

use cloudwatch_logs_cmdlets_core::{ConfirmationPrompt, ConfirmationRequest};
use std::io::{self, BufRead, Write};

/// Asks on stderr and reads the answer from stdin.
///
/// Without a terminal on stdin the answer is always "no", so scripted runs
/// need `--force` to change anything.
pub(crate) struct TerminalPrompt;

impl ConfirmationPrompt for TerminalPrompt {
    fn confirm(&self, request: &ConfirmationRequest) -> bool {
        if !atty::is(atty::Stream::Stdin) {
            log::debug!("stdin is not a terminal; declining: {}", request.message());
            return false;
        }

        eprintln!("{}", request.message());
        eprint!("Continue? [y/N] ");
        if io::stderr().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                log::warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
