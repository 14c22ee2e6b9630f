//! Multi-step workflow orchestration.
//!
//! A workflow is a fixed named sequence of classified commands run for
//! their combined effect, interleaved with labeled statistics snapshots
//! and intermediate file exports. Steps never short-circuit: a failing
//! step marks the workflow failed but every later step still runs, and
//! all errors aggregate into one ordered list.

mod fsm;
mod lgate;

use std::path::{Path, PathBuf};

use crate::report::{StatsSnapshot, WorkflowReport};
use crate::session::Session;

/// What the technology mapping step optimizes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptTarget {
    Area,
    Delay,
}

impl OptTarget {
    /// The mapping command for this target.
    #[must_use]
    pub fn map_command(self) -> &'static str {
        match self {
            Self::Area => "map -m 0 -W -s",
            Self::Delay => "map -n 1 -W -s",
        }
    }
}

/// Gate library used by the mapping workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellLibrary {
    Mcnc,
    Synch,
}

impl CellLibrary {
    /// The library file passed to the read-library command.
    #[must_use]
    pub fn genlib_file(self) -> &'static str {
        match self {
            Self::Mcnc => "mcnc.genlib",
            Self::Synch => "synch.genlib",
        }
    }
}

/// A named workflow with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowSpec {
    /// State-machine optimization and mapping, with or without automatic
    /// state encoding.
    Fsm { autoencoding: bool, optimize: OptTarget },
    /// Combinational optimization and mapping against a gate library.
    Lgate {
        library: CellLibrary,
        optimize: OptTarget,
    },
    /// Sequential-circuit variant of the gate mapping workflow.
    Fsmd { optimize: OptTarget },
}

/// Run the given workflow on a session.
pub async fn run(session: &mut Session, spec: WorkflowSpec) -> WorkflowReport {
    match spec {
        WorkflowSpec::Fsm {
            autoencoding,
            optimize,
        } => fsm::run(session, autoencoding, optimize).await,
        WorkflowSpec::Lgate { library, optimize } => {
            lgate::run(session, library, optimize).await
        }
        // an FSMD is optimized like a combinational block over the
        // sequential library
        WorkflowSpec::Fsmd { optimize } => {
            lgate::run(session, CellLibrary::Synch, optimize).await
        }
    }
}

/// Derive the intermediate export path `<input stem>.<tag>.blif` next to
/// the input file.
pub(crate) fn export_name(input: &Path, tag: &str) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = file_name.strip_suffix(".blif").unwrap_or(&file_name);
    let exported = format!("{stem}.{tag}.blif");
    match input.parent() {
        Some(dir) => dir.join(exported),
        None => PathBuf::from(exported),
    }
}

/// Step runner that accumulates a [`WorkflowReport`] across a sequence of
/// dispatched commands, statistics snapshots and exports.
pub(crate) struct StepLog<'a> {
    session: &'a mut Session,
    report: WorkflowReport,
}

impl<'a> StepLog<'a> {
    pub(crate) fn new(session: &'a mut Session) -> Self {
        let mut report = WorkflowReport::new();
        // success is ANDed down by each failing step
        report.success = true;
        Self { session, report }
    }

    fn echo(&mut self, command: &str) {
        let prompt = &self.session.config().prompt;
        self.report.transcript.push_str(&format!("{prompt} {command}\n"));
    }

    /// Dispatch one classified command and absorb its outcome.
    pub(crate) async fn command(&mut self, command: &str) {
        self.echo(command);
        let res = self.session.run(command).await;

        self.report.errors.extend(res.errors().iter().cloned());
        if let Some(stdout) = res.stdout() {
            self.report.transcript.push_str("\n");
            self.report.transcript.push_str(stdout);
            self.report.transcript.push_str("\n");
        }
        if !res.success() {
            self.report.success = false;
        }
    }

    /// Take a labeled statistics snapshot.
    pub(crate) async fn stats(&mut self, label: &str) {
        self.echo("print_stats");
        let res = self.session.print_stats().await;

        self.report.errors.extend(res.errors.iter().cloned());
        if let Some(stats) = res.stats {
            self.report.snapshots.push(StatsSnapshot {
                label: label.to_string(),
                stats,
            });
        }
        if let Some(stdout) = res.stdout {
            self.report.transcript.push_str("\n");
            self.report.transcript.push_str(&stdout);
            self.report.transcript.push_str("\n");
        }
        if !res.success {
            self.report.success = false;
        }
    }

    /// Export the current network to an intermediate file. The outcome is
    /// deliberately not aggregated into the workflow result.
    pub(crate) async fn export(&mut self, target: &Path) {
        let res = self.session.write_blif(&target.to_string_lossy()).await;
        if !res.success {
            tracing::debug!(target = %target.display(), errors = ?res.errors, "Intermediate export failed");
        }
    }

    pub(crate) fn finish(self) -> WorkflowReport {
        self.report
    }
}
