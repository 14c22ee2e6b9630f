//! Read/write handler and dispatch tests.

use sis_driver::report::CommandReport;
use sis_driver::session::{NetlistFormat, ReadOptions};

use crate::common::{session_with_input, stub_session, temp_circuit};

const NO_CHDIR: ReadOptions = ReadOptions {
    append: false,
    change_dir: false,
};

#[tokio::test]
async fn read_marks_input_and_remembers_the_path() {
    let (mut session, _script) = stub_session(true);
    let circuit = temp_circuit("circuit");
    assert!(session.start().await.success);

    let res = session
        .read(NetlistFormat::Blif, circuit.path(), NO_CHDIR)
        .await;
    assert!(res.success, "read failed: {:?}", res.errors);
    assert!(res.errors.is_empty());
    assert!(session.has_input());
    assert_eq!(session.last_input(), Some(circuit.path()));

    let _ = session.stop().await;
}

#[tokio::test]
async fn read_missing_file_reports_the_resolved_path() {
    let (mut session, _script) = stub_session(true);
    assert!(session.start().await.success);

    let res = session
        .read(NetlistFormat::Blif, "/definitely/missing/input.blif", NO_CHDIR)
        .await;
    assert!(!res.success);
    assert!(res.errors[0].contains("/definitely/missing/input.blif"));
    assert!(res.errors[0].contains("doesn't exist"));
    assert!(!session.has_input());

    let _ = session.stop().await;
}

#[tokio::test]
async fn read_diagnostics_block_success() {
    let (mut session, _script) = stub_session(true);
    let circuit = temp_circuit("bad");
    assert!(session.start().await.success);

    let res = session
        .read(NetlistFormat::Blif, circuit.path(), NO_CHDIR)
        .await;
    assert!(!res.success);
    assert!(res.errors[0].contains("bad character in PLA table"));
    assert!(!session.has_input());

    let _ = session.stop().await;
}

#[tokio::test]
async fn read_warnings_do_not_block_success() {
    let (mut session, _script) = stub_session(true);
    let circuit = temp_circuit("warn");
    assert!(session.start().await.success);

    let res = session
        .read(NetlistFormat::Blif, circuit.path(), NO_CHDIR)
        .await;
    assert!(res.success, "read failed: {:?}", res.errors);
    assert!(res.errors.is_empty());
    assert_eq!(res.warnings.len(), 1);
    assert!(res.warnings[0].contains("dangling nodes"));
    assert!(session.has_input());

    let _ = session.stop().await;
}

#[tokio::test]
async fn write_before_any_read_is_rejected() {
    let (mut session, _script) = stub_session(true);
    assert!(session.start().await.success);

    let res = session.write_blif("/tmp/out.blif").await;
    assert!(!res.success);
    assert!(res.errors[0].contains("nothing to write"));

    let _ = session.stop().await;
}

#[tokio::test]
async fn write_to_file_succeeds_silently() {
    let (mut session, _script, _circuit) = session_with_input().await;

    let res = session.write_blif("/tmp/out.blif").await;
    assert!(res.success, "write failed: {:?}", res.errors);
    assert!(res.stdout.is_none());

    let _ = session.stop().await;
}

#[tokio::test]
async fn write_residual_output_is_an_error() {
    let (mut session, _script, _circuit) = session_with_input().await;

    let res = session.write_blif("/tmp/will-fail.blif").await;
    assert!(!res.success);
    assert!(res.errors[0].contains("unexpected output"));
    assert!(res.stdout.is_some());

    let _ = session.stop().await;
}

#[tokio::test]
async fn stats_roundtrip_through_the_stub() {
    let (mut session, _script, _circuit) = session_with_input().await;

    let res = session.print_stats().await;
    assert!(res.success, "print_stats failed: {:?}", res.errors);
    let stats = res.stats.expect("stats should be parsed");
    assert_eq!(stats.name, "and");
    assert_eq!(stats.inputs, 2);
    assert_eq!(stats.outputs, 1);
    assert_eq!(stats.nodes, 1);
    assert_eq!(stats.latches, 0);
    assert_eq!(stats.literals, 2);
    assert_eq!(stats.states, 0);

    let _ = session.stop().await;
}

#[tokio::test]
async fn stats_require_an_input() {
    let (mut session, _script) = stub_session(true);
    assert!(session.start().await.success);

    let res = session.print_stats().await;
    assert!(!res.success);
    assert!(res.errors[0].contains("no input loaded"));

    let _ = session.stop().await;
}

#[tokio::test]
async fn dispatch_routes_read_and_stats() {
    let (mut session, _script) = stub_session(true);
    let circuit = temp_circuit("circuit");
    assert!(session.start().await.success);

    let res = session
        .run(&format!("read_blif {}", circuit.path().display()))
        .await;
    assert!(matches!(res, CommandReport::Read(_)));
    assert!(res.success());

    let res = session.run("print_stats").await;
    assert!(matches!(res, CommandReport::Stats(_)));
    assert!(res.success());

    let _ = session.stop().await;
}

#[tokio::test]
async fn dispatch_falls_through_to_raw_execution() {
    let (mut session, _script) = stub_session(true);
    assert!(session.start().await.success);

    let res = session.run("full_simplify -d").await;
    assert!(matches!(res, CommandReport::Exec(_)));
    assert!(res.success());

    let _ = session.stop().await;
}

#[tokio::test]
async fn dispatch_rejects_unknown_workflow_variants() {
    let (mut session, _script) = stub_session(true);
    assert!(session.start().await.success);

    let res = session.run("bsis_script no_such_script").await;
    assert!(!res.success());
    assert!(res.errors()[0].contains("unrecognized script variant"));

    let _ = session.stop().await;
}
