//! Workflow orchestration tests: step sequencing, snapshot labeling and
//! partial-failure aggregation.

use sis_driver::report::CommandReport;
use sis_driver::session::Session;

use crate::common::{stub_config, temp_circuit, write_stub};

async fn session_with_input_on(rugged_ok: bool) -> (Session, Vec<tempfile::NamedTempFile>) {
    let script = write_stub(rugged_ok);
    let circuit = temp_circuit("circuit");
    let mut session = Session::with_config(stub_config(script.path()));

    assert!(session.start().await.success);
    let read = session
        .run(&format!("read_blif {}", circuit.path().display()))
        .await;
    assert!(read.success(), "read failed: {:?}", read.errors());

    (session, vec![script, circuit])
}

#[tokio::test]
async fn lgate_area_runs_all_steps_and_labels_snapshots() {
    let (mut session, _files) = session_with_input_on(true).await;

    let res = session.run("bsis_script lgate_area_mcnc").await;
    let CommandReport::Workflow(report) = res else {
        panic!("expected a workflow report");
    };

    assert!(report.success, "workflow failed: {:?}", report.errors);
    assert!(report.errors.is_empty());

    let labels: Vec<&str> = report.snapshots.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["1_initial_stats", "3_rugged_stats", "4_map_stats"]
    );
    assert!(report.snapshot("1_initial_stats").is_some());

    // the transcript interleaves prompts and outputs
    assert!(report.transcript.contains("sis> print_stats"));
    assert!(report.transcript.contains("sis> map -m 0 -W -s"));
    assert!(report.transcript.contains("lits(sop)="));

    let _ = session.stop().await;
}

#[tokio::test]
async fn lgate_delay_adds_the_reduce_depth_snapshot() {
    let (mut session, _files) = session_with_input_on(true).await;

    let res = session.run("bsis_script lgate_delay_synch").await;
    let CommandReport::Workflow(report) = res else {
        panic!("expected a workflow report");
    };

    assert!(report.success, "workflow failed: {:?}", report.errors);
    let labels: Vec<&str> = report.snapshots.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "1_initial_stats",
            "2_reduce_depth_stats",
            "3_rugged_stats",
            "4_map_stats"
        ]
    );
    assert!(report.transcript.contains("sis> reduce_depth"));
    assert!(report.transcript.contains("sis> read_library synch.genlib"));

    let _ = session.stop().await;
}

#[tokio::test]
async fn fsm_workflow_runs_the_state_machine_steps() {
    let (mut session, _files) = session_with_input_on(true).await;

    let res = session.run("bsis_script fsm_area").await;
    let CommandReport::Workflow(report) = res else {
        panic!("expected a workflow report");
    };

    assert!(report.success, "workflow failed: {:?}", report.errors);
    let labels: Vec<&str> = report.snapshots.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "1_initial_stats",
            "2_optimized_states",
            "4_rugged_stats",
            "5_map_stats"
        ]
    );
    assert!(report.transcript.contains("sis> state_minimize stamina"));
    // fsm_area collapses the STG instead of auto-encoding
    assert!(report.transcript.contains("sis> stg_to_network"));
    assert!(!report.transcript.contains("sis> state_assign jedi"));

    let _ = session.stop().await;
}

#[tokio::test]
async fn fsmd_maps_against_the_sequential_library() {
    let (mut session, _files) = session_with_input_on(true).await;

    let res = session.run("bsis_script fsmd_delay").await;
    let CommandReport::Workflow(report) = res else {
        panic!("expected a workflow report");
    };

    assert!(report.success, "workflow failed: {:?}", report.errors);
    assert!(report.transcript.contains("sis> read_library synch.genlib"));

    let _ = session.stop().await;
}

#[tokio::test]
async fn failing_step_does_not_stop_later_steps() {
    // the stub's rugged script reports an error in this variant
    let (mut session, _files) = session_with_input_on(false).await;

    let res = session.run("bsis_script lgate_area_mcnc").await;
    let CommandReport::Workflow(report) = res else {
        panic!("expected a workflow report");
    };

    assert!(!report.success);
    assert!(!report.errors.is_empty());
    assert!(report.errors.iter().any(|e| e.contains("unexpected output")));

    // the steps after the failing one still ran
    let labels: Vec<&str> = report.snapshots.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["1_initial_stats", "3_rugged_stats", "4_map_stats"]
    );
    assert!(report.transcript.contains("sis> map -m 0 -W -s"));

    let _ = session.stop().await;
}

#[tokio::test]
async fn workflows_require_an_input() {
    let script = write_stub(true);
    let mut session = Session::with_config(stub_config(script.path()));
    assert!(session.start().await.success);

    let res = session.run("bsis_script lgate_area_mcnc").await;
    let CommandReport::Workflow(report) = res else {
        panic!("expected a workflow report");
    };

    assert!(!report.success);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("no input loaded"));
    // no step ran
    assert!(report.snapshots.is_empty());
    assert!(report.transcript.is_empty());

    let _ = session.stop().await;
}
