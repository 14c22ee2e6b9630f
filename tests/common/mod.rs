//! Shared test helpers: a scripted stand-in for the interactive tool.
//!
//! The stub is a `/bin/sh` script that speaks the same framing protocol
//! as the real tool: a startup banner, a `sis> ` prompt after every
//! command, pagination markers answered by a single keystroke, and canned
//! statistics/simulation output.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use sis_driver::config::SisConfig;
use sis_driver::session::Session;

const STUB_HEAD: &str = r#"#!/bin/sh
printf "UC Berkeley, SIS 1.3 (compiled 2020-01-01)\nsis> "
while IFS= read -r line; do
  case "$line" in
    quit|exit)
      exit 0
      ;;
    die)
      exit 3
      ;;
    hang)
      sleep 30
      printf "sis> "
      ;;
    paged)
      printf "paged\nfirst page of output\n--More--(33%%)"
      dd bs=1 count=1 >/dev/null 2>&1
      printf "\nsecond page of output\n--More--(66%%)"
      dd bs=1 count=1 >/dev/null 2>&1
      printf "\nthird page of output\nsis> "
      ;;
    echoback)
      printf "echoback\nhello from the tool\nsis> "
      ;;
    print_stats)
      printf "print_stats\nand             pi= 2   po= 1   nodes=  1       latches= 0\nlits(sop)=   2\nsis> "
      ;;
    "simulate 1 1")
      printf "simulate 1 1\nNetwork simulation:\nOutputs: 1\nNext state:\nsis> "
      ;;
    "simulate 1 1 1")
      printf "simulate 1 1 1\nNetwork simulation:\nOutputs: 1 0\nNext state: 01\n\nSTG simulation:\nOutputs: 1 0\nNext state: st1\nsis> "
      ;;
    simulate*)
      printf "simulate network: network has 2 inputs; wrong number of values were supplied\nsis> "
      ;;
    read_blif*bad*|read_eqn*bad*)
      printf "bad input, line 5: bad character in PLA table\nsis> "
      ;;
    read_blif*warn*)
      printf "Warning: network has dangling nodes\nsis> "
      ;;
    write_blif*fail*)
      printf "write_blif: unable to open output file\nsis> "
      ;;
"#;

const STUB_RUGGED_OK: &str = r#"    "source script.rugged")
      printf "sis> "
      ;;
"#;

const STUB_RUGGED_FAIL: &str = r#"    "source script.rugged")
      printf "cannot open file script.rugged\nsis> "
      ;;
"#;

const STUB_TAIL: &str = r#"    *)
      printf "sis> "
      ;;
  esac
done
exit 0
"#;

/// Write the stub tool script to a temp file.
///
/// `rugged_ok` controls whether the rugged script step completes silently
/// (success) or reports an error, which lets tests exercise partial
/// workflow failures.
pub fn write_stub(rugged_ok: bool) -> NamedTempFile {
    let rugged = if rugged_ok {
        STUB_RUGGED_OK
    } else {
        STUB_RUGGED_FAIL
    };
    let mut file = NamedTempFile::new().expect("temp file for stub script");
    file.write_all(STUB_HEAD.as_bytes())
        .and_then(|()| file.write_all(rugged.as_bytes()))
        .and_then(|()| file.write_all(STUB_TAIL.as_bytes()))
        .expect("write stub script");
    file.flush().expect("flush stub script");
    file
}

/// Session configuration pointing at the stub script.
pub fn stub_config(script: &Path) -> SisConfig {
    SisConfig {
        binary: "sh".to_string(),
        args: vec![script.display().to_string()],
        command_timeout_ms: 5_000,
        stop_grace_ms: 1_000,
        changedir_on_read: false,
        ..SisConfig::default()
    }
}

/// A fresh (not yet started) session driving the stub tool.
pub fn stub_session(rugged_ok: bool) -> (Session, NamedTempFile) {
    let script = write_stub(rugged_ok);
    let session = Session::with_config(stub_config(script.path()));
    (session, script)
}

/// A circuit input file the stub will accept; the name prefix selects the
/// stub's behavior (plain, `bad`, `warn`).
pub fn temp_circuit(prefix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(".blif")
        .tempfile()
        .expect("temp circuit file");
    writeln!(file, ".model test").expect("write circuit file");
    file.flush().expect("flush circuit file");
    file
}

/// A started session that has already read a (plain) input file.
pub async fn session_with_input() -> (Session, NamedTempFile, NamedTempFile) {
    let (mut session, script) = stub_session(true);
    let circuit = temp_circuit("circuit");

    let start_res = session.start().await;
    assert!(start_res.success, "start failed: {:?}", start_res.errors);

    let read_res = session
        .run(&format!("read_blif {}", circuit.path().display()))
        .await;
    assert!(read_res.success(), "read failed: {:?}", read_res.errors());
    assert!(session.has_input());

    (session, script, circuit)
}
