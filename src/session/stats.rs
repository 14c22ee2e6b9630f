//! Statistics query handler.

use crate::parse::stats::parse_stats;
use crate::report::StatsReport;
use crate::session::{Session, SessionError};

impl Session {
    /// Query and parse the current network statistics.
    ///
    /// Requires a running process and a previously read input.
    pub async fn print_stats(&mut self) -> StatsReport {
        let mut report = StatsReport::new();

        if !self.is_running() {
            report.fail(format!("print_stats: {}", SessionError::NotRunning));
            return report;
        }
        if !self.has_input() {
            report.fail(format!("print_stats: {}", SessionError::NothingToProcess));
            return report;
        }

        let exec_res = self.execute("print_stats").await;
        if !exec_res.success {
            for error in exec_res.errors {
                report.errors.push(format!("print_stats: {error}"));
            }
            return report;
        }

        report.stdout = exec_res.stdout;
        let raw = report.stdout.clone().unwrap_or_default();
        match parse_stats(&raw) {
            Ok(stats) => {
                report.stats = Some(stats);
                report.success = true;
            }
            Err(e) => report.errors.push(format!("print_stats: {e}")),
        }

        report
    }
}
