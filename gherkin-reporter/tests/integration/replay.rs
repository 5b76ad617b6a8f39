// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::{LOGIN_LOG, replay_plain};
use gherkin_reporter::{
    errors::EventLogError,
    replay::replay,
    reporter::{ReporterBuilder, ReporterOutput},
};
use pretty_assertions::assert_eq;

#[test]
fn replaying_twice_resets_the_run() {
    let once = replay_plain(LOGIN_LOG);

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let report = {
        let mut reporter = ReporterBuilder::default().build(ReporterOutput::Buffer {
            stdout: &mut stdout,
            stderr: &mut stderr,
        });
        replay(LOGIN_LOG.as_bytes(), &mut reporter).expect("first replay succeeds");
        replay(LOGIN_LOG.as_bytes(), &mut reporter).expect("second replay succeeds");
        reporter.report().clone()
    };

    assert_eq!(report, once.report);
    let stdout = String::from_utf8(stdout).expect("output is UTF-8");
    assert_eq!(stdout, once.stdout.repeat(2));
}

#[test]
fn errors_stop_the_replay() {
    let log = [
        r#"{"event": "start"}"#,
        r#"{"event": "feature", "node": {"id": "f", "kind": "feature", "title": "Login"}}"#,
        "",
        r#"{"event": "scenario", "node": {"id": "sc", "parent": "missing", "kind": "scenario", "title": "x"}}"#,
        r#"{"event": "end"}"#,
    ]
    .join("\n");
    let transcript = replay_plain(&log);

    match transcript.result {
        Err(EventLogError::UnknownParent { line, id, parent }) => {
            assert_eq!((line, id.as_str(), parent.as_str()), (4, "sc", "missing"));
        }
        other => panic!("expected an unknown parent error, found {other:?}"),
    }
    assert_eq!(transcript.stdout, "\nLogin\n\n", "events before the error are reported");
    assert_eq!(transcript.stderr, "", "the run never finished");
}

#[test]
fn truncated_log() {
    let log = LOGIN_LOG
        .lines()
        .take_while(|line| !line.contains("\"step pass\""))
        .collect::<Vec<_>>()
        .join("\n");
    let transcript = replay_plain(&log);
    assert_eq!(transcript.result.expect("log is valid"), 5);
    assert!(
        transcript.stdout.ends_with("      ◦ Given: a user"),
        "the running step is left open: {:?}",
        transcript.stdout,
    );
}
