//! File-backed `tracing` setup.
//!
//! The terminal belongs to the UI, so diagnostics from the runtime and the
//! session go to a log file instead. Nothing is logged unless a file is
//! configured through [`ProgramOptions::log_file`](crate::ProgramOptions::log_file).

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;

use crate::runtime::ProgramError;

/// Install a global `tracing` subscriber that appends to `path`.
///
/// Fails if the file cannot be opened or a subscriber is already installed.
pub fn log_to_file(path: impl AsRef<Path>) -> Result<(), ProgramError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_ref())?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(Level::DEBUG)
        .try_init()
        .map_err(|err| ProgramError::Logging(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unopenable_path_is_an_io_error() {
        let path = std::env::temp_dir()
            .join("matchlab-missing-dir")
            .join("nested")
            .join("matchlab.log");
        assert!(matches!(log_to_file(path), Err(ProgramError::Io(_))));
    }
}
