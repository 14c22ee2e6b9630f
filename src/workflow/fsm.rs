//! State-machine optimization and mapping workflow.

use crate::report::WorkflowReport;
use crate::session::{Session, SessionError};
use crate::workflow::{export_name, OptTarget, StepLog};

/// Optimize a state machine and map it onto the sequential gate library.
///
/// With `autoencoding` the states are encoded automatically
/// (`state_assign jedi`); without it the state-transition graph is
/// collapsed into a plain network (`stg_to_network`).
pub(crate) async fn run(
    session: &mut Session,
    autoencoding: bool,
    optimize: OptTarget,
) -> WorkflowReport {
    let mut report = WorkflowReport::new();

    if !session.is_running() {
        report.fail(format!("fsm workflow: {}", SessionError::NotRunning));
        return report;
    }
    let Some(input) = session.last_input().map(std::path::Path::to_path_buf) else {
        report.fail(format!("fsm workflow: {}", SessionError::NothingToProcess));
        return report;
    };

    let mut log = StepLog::new(session);

    log.stats("1_initial_stats").await;

    log.command("state_minimize stamina").await;
    if autoencoding {
        log.command("state_assign jedi").await;
    } else {
        log.command("stg_to_network").await;
    }
    log.stats("2_optimized_states").await;
    log.export(&export_name(&input, "state_min_encoding")).await;

    if optimize == OptTarget::Delay {
        log.command("reduce_depth").await;
        log.stats("3_reduce_depth_stats").await;
    }

    log.command("source script.rugged").await;
    log.stats("4_rugged_stats").await;
    log.export(&export_name(&input, "optimized")).await;

    log.command("read_library synch.genlib").await;
    log.command(optimize.map_command()).await;
    log.stats("5_map_stats").await;
    log.export(&export_name(&input, "mapped")).await;

    log.finish()
}
