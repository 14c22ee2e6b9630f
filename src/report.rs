//! Result envelopes returned by session operations.
//!
//! Every operation reports through one of these envelopes instead of
//! propagating errors up the call stack. The invariant across all of them:
//! `success == true` implies `errors` is empty, and every failure path
//! appends at least one descriptive error string.

use serde::Serialize;

/// Result of a plain command execution (start/stop/exec and friends).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExecReport {
    /// Whether the operation completed without errors.
    pub success: bool,
    /// Ordered error messages, each prefixed with the originating operation.
    pub errors: Vec<String>,
    /// Raw captured output, `None` when the command produced no output.
    pub stdout: Option<String>,
}

impl ExecReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure, keeping the envelope invariant intact.
    pub fn fail(&mut self, error: impl Into<String>) {
        self.success = false;
        self.errors.push(error.into());
    }
}

/// Result of a read operation. Reads additionally classify diagnostic
/// lines into warnings, which do not block success.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReadReport {
    pub success: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stdout: Option<String>,
}

impl ReadReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        self.success = false;
        self.errors.push(error.into());
    }
}

/// Statistics of the currently loaded network, as reported by the tool's
/// statistics dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkStats {
    /// Network name (leading token of the statistics line).
    pub name: String,
    /// Primary input count.
    pub inputs: u32,
    /// Primary output count.
    pub outputs: u32,
    /// Internal node count.
    pub nodes: u32,
    /// Latch count.
    pub latches: u32,
    /// Sum-of-products literal count.
    pub literals: u32,
    /// State count of the state-transition graph; 0 when no STG is present.
    pub states: u32,
}

/// Result of a statistics query.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatsReport {
    pub success: bool,
    pub errors: Vec<String>,
    pub stdout: Option<String>,
    /// Parsed statistics, present only on success.
    pub stats: Option<NetworkStats>,
}

impl StatsReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        self.success = false;
        self.errors.push(error.into());
    }
}

/// Outcome of a circuit simulation.
///
/// The STG fields are present only when the circuit carries a
/// state-transition graph alongside the plain node network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationResult {
    /// Output bit string, spaces removed.
    pub outputs: String,
    /// Next state of the node network.
    pub next_state: String,
    /// STG output bit string, if an STG was simulated.
    pub stg_outputs: Option<String>,
    /// STG next state, if an STG was simulated.
    pub stg_next_state: Option<String>,
}

/// Result of a simulation command.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimReport {
    pub success: bool,
    pub errors: Vec<String>,
    pub stdout: Option<String>,
    /// Parsed simulation outcome, present only on success.
    pub output: Option<SimulationResult>,
}

impl SimReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        self.success = false;
        self.errors.push(error.into());
    }
}

/// A labeled statistics snapshot taken at a fixed point of a workflow.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    /// Numbered tag identifying the point in the workflow, e.g.
    /// `1_initial_stats`.
    pub label: String,
    pub stats: NetworkStats,
}

/// Aggregated result of a multi-step workflow.
///
/// A failing step does not short-circuit the remaining steps; `success` is
/// the logical AND of every step and `errors` collects all steps' errors
/// in order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkflowReport {
    pub success: bool,
    pub errors: Vec<String>,
    /// Combined prompt-annotated output of every step, in order.
    pub transcript: String,
    /// Statistics snapshots taken between steps, in order.
    pub snapshots: Vec<StatsSnapshot>,
}

impl WorkflowReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        self.success = false;
        self.errors.push(error.into());
    }

    /// Look up a snapshot by label.
    #[must_use]
    pub fn snapshot(&self, label: &str) -> Option<&NetworkStats> {
        self.snapshots
            .iter()
            .find(|s| s.label == label)
            .map(|s| &s.stats)
    }
}

/// Tagged result of a dispatched command, one variant per operation
/// category.
#[derive(Debug, Clone, Serialize)]
pub enum CommandReport {
    Exec(ExecReport),
    Read(ReadReport),
    Stats(StatsReport),
    Simulate(SimReport),
    Workflow(WorkflowReport),
}

impl CommandReport {
    /// Whether the dispatched operation succeeded.
    #[must_use]
    pub fn success(&self) -> bool {
        match self {
            Self::Exec(r) => r.success,
            Self::Read(r) => r.success,
            Self::Stats(r) => r.success,
            Self::Simulate(r) => r.success,
            Self::Workflow(r) => r.success,
        }
    }

    /// The operation's error messages, in order.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        match self {
            Self::Exec(r) => &r.errors,
            Self::Read(r) => &r.errors,
            Self::Stats(r) => &r.errors,
            Self::Simulate(r) => &r.errors,
            Self::Workflow(r) => &r.errors,
        }
    }

    /// Raw captured output, if the operation produced any.
    #[must_use]
    pub fn stdout(&self) -> Option<&str> {
        match self {
            Self::Exec(r) => r.stdout.as_deref(),
            Self::Read(r) => r.stdout.as_deref(),
            Self::Stats(r) => r.stdout.as_deref(),
            Self::Simulate(r) => r.stdout.as_deref(),
            Self::Workflow(r) => (!r.transcript.is_empty()).then_some(r.transcript.as_str()),
        }
    }
}
