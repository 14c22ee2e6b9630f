//! Syntactic classification of raw command strings.
//!
//! The classifier matches a raw command against an ordered list of
//! recognized shapes and extracts their parameters. Classification is
//! purely syntactic: unrecognized or malformed variants are not errors,
//! they fall through to raw execution so commands the classifier does not
//! understand keep working.

use regex::{Captures, Regex};

use crate::session::NetlistFormat;
use crate::workflow::{CellLibrary, OptTarget, WorkflowSpec};

/// A classified command, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Read a circuit description file, optionally appending to the
    /// current network.
    Read {
        format: NetlistFormat,
        path: String,
        append: bool,
    },
    /// Write the current network to a file.
    Write { format: NetlistFormat, target: String },
    /// Run the rugged optimization script.
    RuggedScript,
    /// Query network statistics.
    PrintStats,
    /// Simulate the network with the given input pattern.
    Simulate { pattern: String },
    /// Run a named multi-step workflow.
    Workflow(WorkflowSpec),
    /// A workflow name that is not recognized; dispatching it is an error.
    UnknownWorkflow { variant: String },
    /// Convert the state-transition graph to a node network.
    StgToNetwork,
    /// Anything else, passed through to the engine verbatim.
    Raw(String),
}

/// One classification rule: a shape pattern and its parameter extractor.
struct Rule {
    pattern: Regex,
    build: fn(&Captures<'_>) -> Command,
}

fn quoted_path(caps: &Captures<'_>) -> String {
    caps[1].trim_matches('"').to_string()
}

fn workflow_for(variant: &str) -> Command {
    let spec = match variant {
        "fsm_autoencoding_area" => WorkflowSpec::Fsm {
            autoencoding: true,
            optimize: OptTarget::Area,
        },
        "fsm_autoencoding_delay" => WorkflowSpec::Fsm {
            autoencoding: true,
            optimize: OptTarget::Delay,
        },
        "fsm_area" => WorkflowSpec::Fsm {
            autoencoding: false,
            optimize: OptTarget::Area,
        },
        "fsm_delay" => WorkflowSpec::Fsm {
            autoencoding: false,
            optimize: OptTarget::Delay,
        },
        "lgate_area_mcnc" => WorkflowSpec::Lgate {
            library: CellLibrary::Mcnc,
            optimize: OptTarget::Area,
        },
        "lgate_delay_mcnc" => WorkflowSpec::Lgate {
            library: CellLibrary::Mcnc,
            optimize: OptTarget::Delay,
        },
        "lgate_area_synch" => WorkflowSpec::Lgate {
            library: CellLibrary::Synch,
            optimize: OptTarget::Area,
        },
        "lgate_delay_synch" => WorkflowSpec::Lgate {
            library: CellLibrary::Synch,
            optimize: OptTarget::Delay,
        },
        "fsmd_area" => WorkflowSpec::Fsmd {
            optimize: OptTarget::Area,
        },
        "fsmd_delay" => WorkflowSpec::Fsmd {
            optimize: OptTarget::Delay,
        },
        other => {
            return Command::UnknownWorkflow {
                variant: other.to_string(),
            }
        }
    };
    Command::Workflow(spec)
}

/// Ordered command classifier.
///
/// Rules are evaluated in priority order; the first match wins and
/// anything unmatched becomes [`Command::Raw`].
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    /// Build the classifier with the full recognized-command grammar.
    #[must_use]
    pub fn new() -> Self {
        let table: Vec<(&str, fn(&Captures<'_>) -> Command)> = vec![
            (r"^read_blif\s+-a\s+(\S*)$", |c| Command::Read {
                format: NetlistFormat::Blif,
                path: quoted_path(c),
                append: true,
            }),
            (r"^read_blif\s+(\S*)\s+-a$", |c| Command::Read {
                format: NetlistFormat::Blif,
                path: quoted_path(c),
                append: true,
            }),
            (r"^read_blif\s+(\S*)$", |c| Command::Read {
                format: NetlistFormat::Blif,
                path: quoted_path(c),
                append: false,
            }),
            (r"^read_eqn\s+-a\s+(\S*)$", |c| Command::Read {
                format: NetlistFormat::Eqn,
                path: quoted_path(c),
                append: true,
            }),
            (r"^read_eqn\s+(\S*)\s+-a$", |c| Command::Read {
                format: NetlistFormat::Eqn,
                path: quoted_path(c),
                append: true,
            }),
            (r"^read_eqn\s+(\S*)$", |c| Command::Read {
                format: NetlistFormat::Eqn,
                path: quoted_path(c),
                append: false,
            }),
            (r"^write_blif\s+(\S*)$", |c| Command::Write {
                format: NetlistFormat::Blif,
                target: quoted_path(c),
            }),
            (r"^write_eqn\s+(\S*)$", |c| Command::Write {
                format: NetlistFormat::Eqn,
                target: quoted_path(c),
            }),
            (r"^source script\.rugged$", |_| Command::RuggedScript),
            (r"^print_stats$", |_| Command::PrintStats),
            (r"^simulate\s+(.*)$", |c| Command::Simulate {
                pattern: c[1].to_string(),
            }),
            (r"^sim\s+(.*)$", |c| Command::Simulate {
                pattern: c[1].to_string(),
            }),
            (r"^bsis_script\s*(.*)$", |c| workflow_for(c[1].trim())),
            (r"^stg_to_network$", |_| Command::StgToNetwork),
        ];

        let rules = table
            .into_iter()
            .filter_map(|(pattern, build)| match Regex::new(pattern) {
                Ok(pattern) => Some(Rule { pattern, build }),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to compile classifier rule");
                    None
                }
            })
            .collect();

        Self { rules }
    }

    /// Classify a raw command string.
    #[must_use]
    pub fn classify(&self, raw: &str) -> Command {
        let stripped = raw.trim();
        for rule in &self.rules {
            if let Some(caps) = rule.pattern.captures(stripped) {
                return (rule.build)(&caps);
            }
        }
        Command::Raw(stripped.to_string())
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}
