//! User-facing prompts and progress reporting.
//!
//! The import driver talks to the user only through these two seams. The
//! reference UI used blocking dialogs; any substitute must keep the same
//! information and keep the confirmation blocking until answered.

use std::io::{self, BufRead, Write};

use log::{debug, info};

/// Blocking user prompts around an import batch.
pub trait Prompter: Send + Sync {
    /// Asks a yes/no question and blocks until the user answers.
    fn confirm(&self, message: &str) -> bool;

    /// Shows an informational message.
    fn notify(&self, message: &str);
}

/// Progress feedback while a batch is running.
///
/// `update` calls are monotonic and synchronous with the record index.
pub trait ProgressReporter: Send + Sync {
    fn begin(&self, _total: usize) {}

    fn update(&self, current: usize, total: usize);

    fn end(&self) {}
}

/// Progress reporter that writes to the log, useful as a default.
#[derive(Debug, Default)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn begin(&self, total: usize) {
        debug!("import progress: 0 / {total}");
    }

    fn update(&self, current: usize, total: usize) {
        info!("import progress: {current} / {total}");
    }

    fn end(&self) {
        debug!("import progress closed");
    }
}

/// Prompter backed by the terminal, for command-line front ends.
#[derive(Debug, Default)]
pub struct ConsolePrompter;

impl Prompter for ConsolePrompter {
    fn confirm(&self, message: &str) -> bool {
        print!("{message} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }

        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }

    fn notify(&self, message: &str) {
        println!("{message}");
    }
}
