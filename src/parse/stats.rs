//! Parser for the statistics dump.
//!
//! The statistics command prints exactly two lines:
//!
//! ```text
//! and             pi= 2   po= 1   nodes=  1       latches= 0
//! lits(sop)=   2  #states(STG)=   4
//! ```
//!
//! The `#states(STG)=` field is optional; its absence means the circuit
//! has no state-transition graph and `states` is reported as 0.

use regex::Regex;

use crate::report::NetworkStats;

/// Errors produced while parsing a statistics dump.
#[derive(thiserror::Error, Debug)]
pub enum StatsParseError {
    /// The raw text did not have the expected line count or field layout.
    #[error("unexpected statistics output shape: {0}")]
    UnexpectedShape(String),
    /// A numeric field failed to parse as an integer.
    #[error("statistics field is not a number: {0:?}")]
    NonNumeric(String),
}

fn parse_count(field: &str) -> Result<u32, StatsParseError> {
    field
        .trim()
        .parse::<u32>()
        .map_err(|_| StatsParseError::NonNumeric(field.to_string()))
}

/// Parse a raw statistics dump into typed statistics.
///
/// # Errors
///
/// `UnexpectedShape` on any structural mismatch, `NonNumeric` when a
/// captured numeric field is unparsable.
pub fn parse_stats(raw: &str) -> Result<NetworkStats, StatsParseError> {
    let lines: Vec<&str> = raw.trim().lines().map(|l| l.trim_end_matches('\r')).collect();
    if lines.len() != 2 {
        return Err(StatsParseError::UnexpectedShape(format!(
            "expected two lines, found {}",
            lines.len()
        )));
    }

    let header = Regex::new(
        r"^(\S*)\s*pi=\s*(\d*)\s*po=\s*(\d*)\s*nodes=\s*(\d*)\s*latches=\s*(\d*)\s*$",
    )
    .expect("header pattern is valid");
    let literals = Regex::new(r"^lits\(sop\)=\s*(\d*)").expect("literals pattern is valid");
    let states = Regex::new(r"#states\(STG\)=\s*(\d*)").expect("states pattern is valid");

    let header_caps = header.captures(lines[0]).ok_or_else(|| {
        StatsParseError::UnexpectedShape(format!("unrecognized statistics line: {:?}", lines[0]))
    })?;
    let literals_caps = literals.captures(lines[1]).ok_or_else(|| {
        StatsParseError::UnexpectedShape(format!("unrecognized literals line: {:?}", lines[1]))
    })?;

    let state_count = match states.captures(lines[1]) {
        Some(caps) => parse_count(&caps[1])?,
        None => 0,
    };

    Ok(NetworkStats {
        name: header_caps[1].to_string(),
        inputs: parse_count(&header_caps[2])?,
        outputs: parse_count(&header_caps[3])?,
        nodes: parse_count(&header_caps[4])?,
        latches: parse_count(&header_caps[5])?,
        literals: parse_count(&literals_caps[1])?,
        states: state_count,
    })
}
