//! Classified command dispatch.

use std::future::Future;
use std::pin::Pin;

use crate::command::Command;
use crate::report::{CommandReport, ExecReport, WorkflowReport};
use crate::session::read::ReadOptions;
use crate::session::Session;
use crate::workflow;

impl Session {
    /// Classify a raw command string and route it to the matching handler.
    ///
    /// Unrecognized commands are passed through to the engine verbatim.
    pub async fn run(&mut self, raw: &str) -> CommandReport {
        let command = self.classifier.classify(raw);
        self.dispatch(command).await
    }

    /// Dispatch an already classified command.
    pub async fn dispatch(&mut self, command: Command) -> CommandReport {
        match command {
            Command::Read {
                format,
                path,
                append,
            } => {
                let options = ReadOptions {
                    append,
                    change_dir: self.config.changedir_on_read,
                };
                CommandReport::Read(self.read(format, &path, options).await)
            }
            Command::Write { format, target } => {
                CommandReport::Exec(self.write(format, &target, "").await)
            }
            Command::RuggedScript => CommandReport::Exec(self.script_rugged().await),
            Command::PrintStats => CommandReport::Stats(self.print_stats().await),
            Command::Simulate { pattern } => {
                CommandReport::Simulate(self.simulate(&pattern).await)
            }
            Command::StgToNetwork => CommandReport::Exec(self.stg_to_network().await),
            Command::Workflow(spec) => {
                // boxed: workflow steps dispatch through this method again
                let fut: Pin<Box<dyn Future<Output = WorkflowReport> + '_>> =
                    Box::pin(workflow::run(self, spec));
                CommandReport::Workflow(fut.await)
            }
            Command::UnknownWorkflow { variant } => {
                let mut report = ExecReport::new();
                report.fail(format!(
                    "bsis_script: unrecognized script variant '{variant}'"
                ));
                CommandReport::Exec(report)
            }
            Command::Raw(command) => CommandReport::Exec(self.execute(&command).await),
        }
    }
}
