use thiserror::Error;

use keel_core::storage::{repository_error_to_exit_code, RepositoryError};

/// Exit code for malformed command-line input (sysexits `EX_USAGE`).
const EX_USAGE: u8 = 64;
/// Exit code for internal failures (sysexits `EX_SOFTWARE`).
const EX_SOFTWARE: u8 = 70;
/// Exit code for output failures (sysexits `EX_IOERR`).
const EX_IOERR: u8 = 74;

/// Errors a CLI command can end with.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("invalid identifier: {0}")]
    InvalidId(String),
    #[error("nothing to update")]
    NothingToUpdate,
    #[error("one of <ID>, --email or --handle is required")]
    MissingLookupKey,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl CommandError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CommandError::InvalidId(_)
            | CommandError::NothingToUpdate
            | CommandError::MissingLookupKey => EX_USAGE,
            CommandError::Repository(err) => repository_error_to_exit_code(err),
            CommandError::Encode(_) => EX_SOFTWARE,
            CommandError::Io(_) => EX_IOERR,
        }
    }

    /// Message shown to the user on stderr.
    pub fn report(&self) -> String {
        match self {
            CommandError::Repository(err) if err.write_committed() => {
                format!("data changed, cache may be stale: {err}")
            }
            other => other.to_string(),
        }
    }
}
