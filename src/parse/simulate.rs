//! Parser for simulation output and the simulation input pattern.
//!
//! A network-only simulation prints three lines; a network with a
//! state-transition graph prints seven (a second block, separated by a
//! blank line, repeating the outputs/next-state pair for the STG).

use crate::report::SimulationResult;

/// Error produced when simulation output does not match either known shape.
#[derive(thiserror::Error, Debug)]
pub enum SimParseError {
    #[error("unexpected simulation output shape")]
    UnexpectedShape,
}

/// Validate and normalize a simulation input pattern.
///
/// Accepts only `0`, `1` and spaces; returns the digits re-joined with
/// single spaces (the argument form the simulation command expects), or
/// `None` when a disallowed character is present.
#[must_use]
pub fn normalize_pattern(raw: &str) -> Option<String> {
    if raw.chars().any(|c| !matches!(c, '0' | '1' | ' ')) {
        return None;
    }

    let bits: Vec<String> = raw
        .chars()
        .filter(|c| matches!(c, '0' | '1'))
        .map(|c| c.to_string())
        .collect();
    Some(bits.join(" "))
}

fn field(line: &str, label: &str) -> String {
    line.replace(label, "").trim().to_string()
}

fn bit_field(line: &str, label: &str) -> String {
    line.replace(label, "").replace(' ', "").trim().to_string()
}

/// Parse raw simulation output into a typed result.
///
/// # Errors
///
/// `UnexpectedShape` when the line count or headers match neither the
/// network-only nor the network-plus-STG layout.
pub fn parse_simulation(raw: &str) -> Result<SimulationResult, SimParseError> {
    let lines: Vec<&str> = raw.trim().lines().map(|l| l.trim_end_matches('\r')).collect();

    match lines.len() {
        3 if lines[0] == "Network simulation:" => Ok(SimulationResult {
            outputs: bit_field(lines[1], "Outputs:"),
            next_state: field(lines[2], "Next state:"),
            stg_outputs: None,
            stg_next_state: None,
        }),
        7 if lines[0] == "Network simulation:" && lines[4] == "STG simulation:" => {
            Ok(SimulationResult {
                outputs: bit_field(lines[1], "Outputs:"),
                next_state: field(lines[2], "Next state:"),
                stg_outputs: Some(bit_field(lines[5], "Outputs:")),
                stg_next_state: Some(field(lines[6], "Next state:")),
            })
        }
        _ => Err(SimParseError::UnexpectedShape),
    }
}
