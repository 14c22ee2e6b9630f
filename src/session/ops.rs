//! Handlers for the remaining recognized single commands.

use crate::report::ExecReport;
use crate::session::{Session, SessionError};

impl Session {
    /// Run a command that is expected to complete silently: success means
    /// the engine reported no residual output.
    async fn execute_silent(&mut self, op: &str, command: &str) -> ExecReport {
        let mut report = ExecReport::new();

        if !self.is_running() {
            report.fail(format!("{op}: {}", SessionError::NotRunning));
            return report;
        }
        if !self.has_input() {
            report.fail(format!("{op}: {}", SessionError::NothingToProcess));
            return report;
        }

        let exec_res = self.execute(command).await;
        report.stdout = exec_res.stdout.clone();

        if exec_res.success {
            if exec_res.stdout.is_none() {
                report.success = true;
            } else {
                report
                    .errors
                    .push(format!("{op}: the command reported unexpected output"));
            }
        } else {
            for error in exec_res.errors {
                report.errors.push(format!("{op}: {error}"));
            }
        }

        report
    }

    /// Convert the state-transition graph into a node network.
    pub async fn stg_to_network(&mut self) -> ExecReport {
        self.execute_silent("stg_to_network", "stg_to_network").await
    }

    /// Run the rugged optimization script on the current network.
    pub async fn script_rugged(&mut self) -> ExecReport {
        self.execute_silent("script_rugged", "source script.rugged")
            .await
    }
}
