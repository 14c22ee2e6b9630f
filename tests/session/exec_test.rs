//! Command execution engine tests: echo stripping, pagination, timeouts
//! and stream-end handling.

use crate::common::{stub_config, stub_session, write_stub};

#[tokio::test]
async fn execute_requires_a_running_session() {
    let (mut session, _script) = stub_session(true);

    let res = session.execute("print_stats").await;
    assert!(!res.success);
    assert!(res.errors[0].contains("not running"));
}

#[tokio::test]
async fn execute_strips_the_command_echo() {
    let (mut session, _script) = stub_session(true);
    assert!(session.start().await.success);

    let res = session.execute("echoback").await;
    assert!(res.success, "execute failed: {:?}", res.errors);
    assert_eq!(res.stdout.as_deref(), Some("hello from the tool"));

    let _ = session.stop().await;
}

#[tokio::test]
async fn execute_collapses_whitespace_output_to_none() {
    let (mut session, _script) = stub_session(true);
    assert!(session.start().await.success);

    // the stub answers unknown commands with just the next prompt
    let res = session.execute("collapse_depth_nonsense").await;
    assert!(res.success);
    assert!(res.stdout.is_none());

    let _ = session.stop().await;
}

#[tokio::test]
async fn paginated_output_is_returned_as_one_piece() {
    let (mut session, _script) = stub_session(true);
    assert!(session.start().await.success);

    let res = session.execute("paged").await;
    assert!(res.success, "execute failed: {:?}", res.errors);

    let stdout = res.stdout.expect("paged output should not be empty");
    assert!(stdout.contains("first page of output"));
    assert!(stdout.contains("second page of output"));
    assert!(stdout.contains("third page of output"));
    // no marker text and no duplicated leading echo line
    assert!(!stdout.contains("--More--"));
    assert!(!stdout.contains("paged"));

    let _ = session.stop().await;
}

#[tokio::test]
async fn execute_times_out_when_no_marker_appears() {
    let script = write_stub(true);
    let mut config = stub_config(script.path());
    config.command_timeout_ms = 300;
    let mut session = sis_driver::session::Session::with_config(config);
    assert!(session.start().await.success);

    let res = session.execute("hang").await;
    assert!(!res.success);
    assert!(res.errors[0].contains("timeout"));

    // the session is indeterminate after a timeout; stop still works
    let res = session.stop().await;
    assert!(res.success, "stop failed: {:?}", res.errors);
}

#[tokio::test]
async fn stream_end_outside_termination_is_an_error() {
    let (mut session, _script) = stub_session(true);
    assert!(session.start().await.success);

    let res = session.execute("die").await;
    assert!(!res.success);
    assert!(res.errors[0].contains("output stream closed"));
}
