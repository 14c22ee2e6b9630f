//! Read handlers for the supported circuit description formats.

use std::path::{Path, PathBuf};

use crate::diag;
use crate::report::ReadReport;
use crate::session::{NetlistFormat, Session, SessionError};

/// Per-call options for a read operation.
#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    /// Append the file to the current network instead of replacing it.
    pub append: bool,
    /// Change the process working directory to the file's directory and
    /// reset the session first, so auxiliary files the tool references by
    /// relative path resolve correctly. Note this side effect is
    /// process-wide.
    pub change_dir: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            append: false,
            change_dir: true,
        }
    }
}

/// Resolve a path against the current working directory without touching
/// the filesystem (the file may not exist yet when we report on it).
fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

impl Session {
    /// Read a circuit description file into the current network.
    ///
    /// Diagnostic lines starting with `Warning: ` become warnings and do
    /// not block success; any other non-empty diagnostic line is a
    /// blocking error. On success the session records that it has an
    /// input and remembers the resolved path.
    pub async fn read(
        &mut self,
        format: NetlistFormat,
        file: impl AsRef<Path>,
        options: ReadOptions,
    ) -> ReadReport {
        let op = format.read_command();
        let mut report = ReadReport::new();

        if !self.is_running() {
            report.fail(format!("{op}: {}", SessionError::NotRunning));
            return report;
        }

        let full_path = absolute(file.as_ref());

        if options.change_dir {
            if let Some(dir) = full_path.parent() {
                if let Err(e) = std::env::set_current_dir(dir) {
                    tracing::warn!(dir = %dir.display(), error = %e, "Could not change working directory");
                }
            }
            let reset_res = self.reset().await;
            if !reset_res.success {
                tracing::warn!(errors = ?reset_res.errors, "Session reset before read failed");
            }
        }

        if !full_path.is_file() {
            report.fail(format!(
                "{op}: {}",
                SessionError::FileNotFound(full_path)
            ));
            return report;
        }

        let flag = if options.append { "-a " } else { "" };
        let exec_res = self
            .execute(&format!("{op} {flag}\"{}\"", full_path.display()))
            .await;

        if !exec_res.success {
            for error in exec_res.errors {
                report.errors.push(format!("{op}: {error}"));
            }
            return report;
        }

        report.stdout = exec_res.stdout;
        let mut found_errors = false;
        if let Some(output) = &report.stdout {
            for line in output.lines() {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line.starts_with("Warning: ") {
                    report.warnings.push(diag::clarify(line));
                } else {
                    report.errors.push(diag::clarify(line));
                    found_errors = true;
                }
            }
        }

        if !found_errors {
            report.success = true;
            self.mark_input(full_path);
        }

        report
    }

    /// Read a BLIF file with default options.
    pub async fn read_blif(&mut self, file: impl AsRef<Path>) -> ReadReport {
        self.read(NetlistFormat::Blif, file, ReadOptions::default())
            .await
    }

    /// Read an equation file with default options.
    pub async fn read_eqn(&mut self, file: impl AsRef<Path>) -> ReadReport {
        self.read(NetlistFormat::Eqn, file, ReadOptions::default())
            .await
    }
}
