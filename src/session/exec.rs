//! Single-command execution engine.
//!
//! State machine per call: wait for a marker; on a pagination marker send
//! one advance keystroke and keep accumulating; on the prompt the
//! accumulated text is the raw result. The command echo is stripped from
//! the result and an all-whitespace remainder collapses to "no output".

use crate::process::{Marker, ScanError};
use crate::report::ExecReport;
use crate::session::{Session, SessionError};

/// Commands whose successful execution legitimately ends the stream.
fn is_termination(command: &str) -> bool {
    matches!(command, "quit" | "exit")
}

impl Session {
    /// Execute one command and wait until the prompt reappears.
    ///
    /// Pagination is resolved transparently: each pagination marker is
    /// answered with a single space and the pages are concatenated. A
    /// closed stream is success only for the termination commands `quit`
    /// and `exit` (which also flip the session to not running); anywhere
    /// else it is reported as an unexpected end.
    pub async fn execute(&mut self, command: &str) -> ExecReport {
        let mut report = ExecReport::new();

        if !self.is_running() {
            report.fail(format!("execute: {}", SessionError::NotRunning));
            return report;
        }

        let command = command.trim().to_string();
        tracing::debug!(command = %command, "Executing command");

        let sent = match self.process.as_mut() {
            Some(process) => process.send_line(&command).await,
            None => {
                report.fail(format!("execute: {}", SessionError::NotRunning));
                return report;
            }
        };
        if let Err(e) = sent {
            report.fail(format!("execute: {}", SessionError::Io(e)));
            return report;
        }

        match self.wait_end_command(&command).await {
            Ok(Some(output)) => {
                let trimmed = output.trim();
                let stripped = trimmed.strip_prefix(command.as_str()).unwrap_or(trimmed);
                let stripped = stripped.trim();
                report.stdout = (!stripped.is_empty()).then(|| stripped.to_string());
                report.success = true;
            }
            Ok(None) => {
                if is_termination(&command) {
                    tracing::debug!("Stream closed after termination command");
                    self.running = false;
                    report.success = true;
                } else {
                    report.fail(format!("execute: {}", SessionError::UnexpectedEnd));
                }
            }
            Err(e) => {
                report.fail(format!(
                    "execute: error while waiting for the end of the command: {e}"
                ));
            }
        }

        report
    }

    /// Scan output until the prompt appears, feeding pagination as needed.
    ///
    /// Returns the accumulated raw output, or `None` when the stream
    /// closed before the prompt (the caller decides whether that was
    /// expected). When pagination occurred, the echoed command is dropped
    /// from the first accumulated line.
    pub(crate) async fn wait_end_command(
        &mut self,
        command: &str,
    ) -> Result<Option<String>, SessionError> {
        let budget = self.config.command_timeout();
        let (Some(process), Some(scanner)) = (self.process.as_mut(), self.scanner.as_mut())
        else {
            return Err(SessionError::NotRunning);
        };

        let mut output = String::new();
        let mut paginated = false;

        loop {
            match scanner.wait_marker(budget).await {
                Ok((before, Marker::Prompt)) => {
                    output.push_str(&before);
                    break;
                }
                Ok((before, Marker::Page)) => {
                    output.push_str(&before);
                    paginated = true;
                    // one space requests the next page
                    process.send(" ").await?;
                }
                Err(ScanError::Timeout) => return Err(SessionError::Timeout),
                Err(ScanError::Eof { partial }) => {
                    if !partial.trim().is_empty() {
                        tracing::debug!(partial = %partial, "Output discarded at stream end");
                    }
                    return Ok(None);
                }
                Err(ScanError::Io(e)) => return Err(SessionError::Io(e)),
            }
        }

        // Paged output starts with the echoed command on its own line;
        // plain output embeds the echo without a line break.
        if paginated {
            if let Some((first, rest)) = output.split_once('\n') {
                if first.trim_end_matches('\r').trim() == command {
                    output = rest.to_string();
                }
            }
        }

        Ok(Some(output))
    }
}
