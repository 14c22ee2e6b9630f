//! Marker scanning over the process output stream.
//!
//! The interactive tool frames its output with two kinds of markers: the
//! literal prompt (ready for the next command) and a pagination marker of
//! the shape `--<label>--(<digits>%)` (more output pending, press a key).
//! The scanner accumulates raw output and reports the text preceding the
//! earliest marker it finds.

use std::time::Duration;

use regex::Regex;
use tokio::io::AsyncReadExt;
use tokio::process::ChildStdout;
use tokio::time::Instant;

/// Pagination marker shape. `.` does not cross line boundaries, so a
/// marker never spans lines.
const PAGE_PATTERN: &str = r"--(.+?)--\((\d+)%\)";

/// Which marker terminated a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// The interactive prompt: the command is finished.
    Prompt,
    /// A pagination marker: more output follows after a keystroke.
    Page,
}

/// Error type for marker scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// No marker appeared within the wait budget.
    #[error("timeout while waiting for an output marker")]
    Timeout,
    /// The stream closed before a marker was seen.
    #[error("output stream closed")]
    Eof {
        /// Output accumulated before the stream closed.
        partial: String,
    },
    /// I/O error while reading the stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Incremental scanner over a child process stdout.
///
/// Bytes read past a reported marker stay buffered for the next scan, so
/// one read may serve several scans.
#[derive(Debug)]
pub struct OutputScanner {
    stdout: ChildStdout,
    pending: String,
    prompt: String,
    page: Regex,
}

impl OutputScanner {
    /// Create a scanner for the given stdout handle and prompt literal.
    #[must_use]
    pub fn new(stdout: ChildStdout, prompt: impl Into<String>) -> Self {
        Self {
            stdout,
            pending: String::new(),
            prompt: prompt.into(),
            page: Regex::new(PAGE_PATTERN).expect("pagination pattern is valid"),
        }
    }

    /// Wait until either marker appears in the stream.
    ///
    /// Returns the text accumulated before the marker and which marker was
    /// found; the marker itself is consumed.
    ///
    /// # Errors
    ///
    /// `Timeout` if no marker appears within `budget`, `Eof` if the stream
    /// closes first, `Io` on read failure.
    pub async fn wait_marker(&mut self, budget: Duration) -> Result<(String, Marker), ScanError> {
        let deadline = Instant::now() + budget;
        let mut chunk = [0u8; 4096];

        loop {
            if let Some(hit) = self.find_marker() {
                return Ok(hit);
            }

            let Some(remaining) = deadline.checked_duration_since(Instant::now()) else {
                return Err(ScanError::Timeout);
            };

            match tokio::time::timeout(remaining, self.stdout.read(&mut chunk)).await {
                Err(_) => return Err(ScanError::Timeout),
                Ok(Ok(0)) => {
                    return Err(ScanError::Eof {
                        partial: std::mem::take(&mut self.pending),
                    })
                }
                Ok(Ok(n)) => self
                    .pending
                    .push_str(&String::from_utf8_lossy(&chunk[..n])),
                Ok(Err(e)) => return Err(ScanError::Io(e)),
            }
        }
    }

    /// Find the earliest marker in the pending buffer and consume through
    /// it. Ties go to the prompt.
    fn find_marker(&mut self) -> Option<(String, Marker)> {
        let prompt_at = self.pending.find(&self.prompt);
        let page_at = self.page.find(&self.pending).map(|m| (m.start(), m.end()));

        let (start, end, marker) = match (prompt_at, page_at) {
            (Some(p), Some((ps, _))) if p <= ps => {
                (p, p + self.prompt.len(), Marker::Prompt)
            }
            (Some(p), None) => (p, p + self.prompt.len(), Marker::Prompt),
            (_, Some((ps, pe))) => (ps, pe, Marker::Page),
            (None, None) => return None,
        };

        let before = self.pending[..start].to_string();
        self.pending.drain(..end);
        Some((before, marker))
    }
}
