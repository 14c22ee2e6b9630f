//! Write handlers for the supported circuit description formats.

use crate::report::ExecReport;
use crate::session::{NetlistFormat, Session, SessionError};

impl Session {
    /// Write the current network to a file, or print it when both the
    /// target and the extra flags are empty.
    ///
    /// A write to a file is expected to be silent: any residual output is
    /// reported as an error. Requires a previously read input.
    pub async fn write(
        &mut self,
        format: NetlistFormat,
        target: &str,
        params: &str,
    ) -> ExecReport {
        let op = format.write_command();
        let mut report = ExecReport::new();

        if !self.is_running() {
            report.fail(format!("{op}: {}", SessionError::NotRunning));
            return report;
        }
        if !self.has_input() {
            report.fail(format!("{op}: {}", SessionError::NothingToWrite));
            return report;
        }

        let command = match (target.is_empty(), params.is_empty()) {
            (true, true) => op.to_string(),
            (false, true) => format!("{op} {target}"),
            (true, false) => format!("{op} {params}"),
            (false, false) => format!("{op} {params} {target}"),
        };

        let exec_res = self.execute(&command).await;
        report.stdout = exec_res.stdout.clone();

        if exec_res.success {
            if target.is_empty() && params.is_empty() {
                // print-to-result form: the output is the network itself
                report.success = true;
            } else if exec_res.stdout.is_none() {
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

    /// Write the current network as BLIF to `target` (empty prints it).
    pub async fn write_blif(&mut self, target: &str) -> ExecReport {
        self.write(NetlistFormat::Blif, target, "").await
    }

    /// Write the current network as equations to `target` (empty prints it).
    pub async fn write_eqn(&mut self, target: &str) -> ExecReport {
        self.write(NetlistFormat::Eqn, target, "").await
    }
}
