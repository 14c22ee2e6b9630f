//! Session lifecycle and command operations.
//!
//! A [`Session`] owns at most one live process at a time and is the single
//! entry point for every operation: lifecycle (start/stop/reset), raw
//! command execution, the specialized read/write/statistics/simulation
//! handlers, and classified dispatch.
//!
//! The protocol is strictly half-duplex: one command in flight per
//! session, and `execute` suspends until the prompt reappears or the wait
//! budget runs out. Callers that need parallelism must use distinct
//! sessions (distinct child processes).

mod dispatch;
mod error;
mod exec;
mod ops;
mod read;
mod simulate;
mod stats;
mod write;

pub use error::SessionError;
pub use read::ReadOptions;

use std::path::{Path, PathBuf};

use crate::command::Classifier;
use crate::config::SisConfig;
use crate::process::{OutputScanner, SisProcess, SisProcessBuilder};
use crate::report::ExecReport;

/// Circuit description formats the tool reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetlistFormat {
    /// Berkeley Logic Interchange Format.
    Blif,
    /// Equation format.
    Eqn,
}

impl NetlistFormat {
    /// The tool command that reads this format.
    #[must_use]
    pub fn read_command(self) -> &'static str {
        match self {
            Self::Blif => "read_blif",
            Self::Eqn => "read_eqn",
        }
    }

    /// The tool command that writes this format.
    #[must_use]
    pub fn write_command(self) -> &'static str {
        match self {
            Self::Blif => "write_blif",
            Self::Eqn => "write_eqn",
        }
    }
}

/// One interactive session with the wrapped tool.
pub struct Session {
    config: SisConfig,
    classifier: Classifier,
    process: Option<SisProcess>,
    scanner: Option<OutputScanner>,
    running: bool,
    has_input: bool,
    last_input: Option<PathBuf>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session with default configuration. No process is spawned
    /// until [`Session::start`] is called.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SisConfig::default())
    }

    /// Create a session with the given configuration.
    #[must_use]
    pub fn with_config(config: SisConfig) -> Self {
        Self {
            config,
            classifier: Classifier::new(),
            process: None,
            scanner: None,
            running: false,
            has_input: false,
            last_input: None,
        }
    }

    /// Whether the process is currently considered running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a read operation has succeeded in this session state.
    #[must_use]
    pub fn has_input(&self) -> bool {
        self.has_input
    }

    /// Path of the last successfully read input file.
    #[must_use]
    pub fn last_input(&self) -> Option<&Path> {
        self.last_input.as_deref()
    }

    /// The session configuration.
    #[must_use]
    pub fn config(&self) -> &SisConfig {
        &self.config
    }

    /// Start the process and wait for its first prompt.
    ///
    /// Fails when the session is already running, when the executable
    /// cannot be spawned, or when no prompt appears within the wait
    /// budget. Any startup banner is captured as `stdout`.
    pub async fn start(&mut self) -> ExecReport {
        let mut report = ExecReport::new();

        if self.running {
            report.fail(format!("start: {}", SessionError::AlreadyRunning));
            return report;
        }

        tracing::info!(binary = %self.config.binary, "Starting session");
        let builder =
            SisProcessBuilder::new(&self.config.binary).args(self.config.args.clone());
        let mut process = match builder.spawn() {
            Ok(process) => process,
            Err(e) => {
                report.fail(format!("start: {}", SessionError::Spawn(e)));
                return report;
            }
        };

        let Some(stdout) = process.take_stdout() else {
            let _ = process.kill().await;
            report.fail("start: process stdout not available".to_string());
            return report;
        };
        self.scanner = Some(OutputScanner::new(stdout, self.config.prompt.clone()));
        self.process = Some(process);

        match self.wait_end_command("").await {
            Ok(Some(banner)) => {
                self.running = true;
                let banner = banner.trim();
                report.stdout = (!banner.is_empty()).then(|| banner.to_string());
                report.success = true;
            }
            Ok(None) => {
                self.teardown().await;
                report.fail(format!(
                    "start: error while waiting for startup: {}",
                    SessionError::UnexpectedEnd
                ));
            }
            Err(e) => {
                self.teardown().await;
                report.fail(format!("start: error while waiting for startup: {e}"));
            }
        }

        report
    }

    /// Stop the process, gracefully first.
    ///
    /// Sends the quit command and waits briefly; if the process is still
    /// alive it is terminated forcefully. Fails only when no process is
    /// running or the process survives forced termination.
    pub async fn stop(&mut self) -> ExecReport {
        let mut report = ExecReport::new();

        if !self.running {
            report.fail(format!("stop: {}", SessionError::NotRunning));
            return report;
        }
        let Some(mut process) = self.process.take() else {
            report.fail(format!("stop: {}", SessionError::NotRunning));
            return report;
        };
        self.scanner = None;

        // try to exit normally first
        let _ = process.send_line("quit").await;
        let grace = self.config.stop_grace();
        match tokio::time::timeout(grace, process.wait()).await {
            Ok(Ok(status)) => {
                tracing::debug!(?status, "Process exited after quit");
                self.running = false;
                report.success = true;
                return report;
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Waiting for process exit failed");
            }
            Err(_) => {
                tracing::debug!("Process ignored quit, terminating");
            }
        }

        if let Err(e) = process.graceful_terminate(grace).await {
            tracing::warn!(error = %e, "Forced termination reported an error");
        }

        match process.try_wait() {
            Ok(Some(_)) => {
                self.running = false;
                report.success = true;
            }
            _ => {
                // keep the handle so a later stop can try again
                self.process = Some(process);
                report.fail(format!("stop: {}", SessionError::StopFailure));
            }
        }

        report
    }

    /// Stop then start, yielding a logically fresh session.
    ///
    /// A stop failure short-circuits the restart. On success the input
    /// flags are re-initialized: the new process has no loaded network.
    pub async fn reset(&mut self) -> ExecReport {
        let mut report = ExecReport::new();

        let stop_res = self.stop().await;
        if !stop_res.success {
            for error in stop_res.errors {
                report.errors.push(format!("reset (stop step): {error}"));
            }
            return report;
        }

        let start_res = self.start().await;
        if start_res.success {
            report.success = true;
            report.stdout = start_res.stdout;
            self.has_input = false;
            self.last_input = None;
        } else {
            for error in start_res.errors {
                report.errors.push(format!("reset (start step): {error}"));
            }
        }

        report
    }

    /// Drop the process handles, killing the child if needed.
    async fn teardown(&mut self) {
        self.scanner = None;
        if let Some(mut process) = self.process.take() {
            let _ = process.kill().await;
        }
    }

    /// Record a successful read of `path`.
    pub(crate) fn mark_input(&mut self, path: PathBuf) {
        self.has_input = true;
        self.last_input = Some(path);
    }
}
