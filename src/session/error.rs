//! Session error taxonomy.
//!
//! These never cross the public API directly: each operation renders them
//! into its result envelope with a contextual prefix naming the operation.

use std::path::PathBuf;

use crate::process::SpawnError;

/// Errors that can occur while driving a session.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    /// A second start while the process is alive.
    #[error("the process is already running in this session")]
    AlreadyRunning,

    /// An operation that needs a live process found none.
    #[error("the process is not running")]
    NotRunning,

    /// The executable could not be launched.
    #[error("couldn't start the process: {0} (check that the tool is installed and on PATH)")]
    Spawn(#[from] SpawnError),

    /// The process survived forced termination.
    #[error("the process is still alive after forced termination")]
    StopFailure,

    /// No marker appeared within the wait budget.
    #[error("timeout while waiting for the end of command execution")]
    Timeout,

    /// The output stream closed outside a termination command.
    #[error("the output stream closed before the prompt reappeared")]
    UnexpectedEnd,

    /// The resolved input file does not exist.
    #[error("'{}' file doesn't exist", .0.display())]
    FileNotFound(PathBuf),

    /// The operation needs a previously read input and none was loaded.
    #[error("no input loaded (use a read command first)")]
    NothingToProcess,

    /// A write was requested before any input was read.
    #[error("nothing to write (use a read command first)")]
    NothingToWrite,

    /// The simulation argument contains characters other than 0, 1, space.
    #[error("invalid simulation inputs (accepted inputs are made of 0s and 1s)")]
    InvalidInputPattern,

    /// The simulation argument width disagrees with the circuit's primary
    /// input count; carries the tool's own diagnostic line.
    #[error("{0}")]
    InputWidthMismatch(String),

    /// I/O failure while talking to the process.
    #[error("I/O error while talking to the process: {0}")]
    Io(#[from] std::io::Error),
}
