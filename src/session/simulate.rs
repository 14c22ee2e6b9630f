//! Simulation handler.

use crate::parse::simulate::{normalize_pattern, parse_simulation, SimParseError};
use crate::report::SimReport;
use crate::session::{Session, SessionError};

impl Session {
    /// Simulate the current network with the given input pattern.
    ///
    /// The pattern may only contain `0`, `1` and spaces and is rejected
    /// before anything is sent to the process. When the output matches
    /// neither known shape, the statistics are re-queried to tell an
    /// input-width mismatch apart from a genuinely malformed response.
    pub async fn simulate(&mut self, pattern: &str) -> SimReport {
        let mut report = SimReport::new();

        if !self.is_running() {
            report.fail(format!("simulate: {}", SessionError::NotRunning));
            return report;
        }
        if !self.has_input() {
            report.fail(format!("simulate: {}", SessionError::NothingToProcess));
            return report;
        }

        let Some(bits) = normalize_pattern(pattern) else {
            report.fail(format!("simulate: {}", SessionError::InvalidInputPattern));
            return report;
        };

        let exec_res = self.execute(&format!("simulate {bits}")).await;
        report.stdout = exec_res.stdout.clone();

        if !exec_res.success {
            for error in exec_res.errors {
                report.errors.push(format!("simulate: {error}"));
            }
            return report;
        }

        let raw = exec_res.stdout.unwrap_or_default();
        match parse_simulation(&raw) {
            Ok(output) => {
                report.output = Some(output);
                report.success = true;
            }
            Err(SimParseError::UnexpectedShape) => {
                report.errors.push(self.diagnose_simulation(&raw).await);
            }
        }

        report
    }

    /// Distinguish an input-width complaint from a malformed response by
    /// checking the first output line against the circuit's primary input
    /// count.
    async fn diagnose_simulation(&mut self, raw: &str) -> String {
        let first_line = raw.trim().lines().next().unwrap_or("").to_string();

        let stats_res = self.print_stats().await;
        if let Some(stats) = stats_res.stats {
            let marker = format!("simulate network: network has {} inputs;", stats.inputs);
            if first_line.contains(&marker) {
                return format!(
                    "simulate: {}",
                    SessionError::InputWidthMismatch(first_line)
                );
            }
        }

        format!("simulate: {}", SimParseError::UnexpectedShape)
    }
}
