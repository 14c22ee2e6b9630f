//! Combinational optimization and gate mapping workflow.

use crate::report::WorkflowReport;
use crate::session::{Session, SessionError};
use crate::workflow::{export_name, CellLibrary, OptTarget, StepLog};

/// Optimize the current network and map it against a gate library.
pub(crate) async fn run(
    session: &mut Session,
    library: CellLibrary,
    optimize: OptTarget,
) -> WorkflowReport {
    let mut report = WorkflowReport::new();

    if !session.is_running() {
        report.fail(format!("lgate workflow: {}", SessionError::NotRunning));
        return report;
    }
    let Some(input) = session.last_input().map(std::path::Path::to_path_buf) else {
        report.fail(format!("lgate workflow: {}", SessionError::NothingToProcess));
        return report;
    };

    let mut log = StepLog::new(session);

    log.stats("1_initial_stats").await;

    if optimize == OptTarget::Delay {
        log.command("reduce_depth").await;
        log.stats("2_reduce_depth_stats").await;
    }

    log.command("source script.rugged").await;
    log.stats("3_rugged_stats").await;
    log.export(&export_name(&input, "optimized")).await;

    log.command(&format!("read_library {}", library.genlib_file())).await;
    log.command(optimize.map_command()).await;
    log.stats("4_map_stats").await;
    log.export(&export_name(&input, "mapped")).await;

    log.finish()
}
