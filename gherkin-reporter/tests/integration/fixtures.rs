// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use gherkin_reporter::{
    errors::EventLogError,
    replay::replay,
    reporter::{ReporterBuilder, ReporterOutput, RunReport},
};

/// One feature with a passing dummy variant, a bug-tagged failure and a
/// bug-tagged variant that passes anyway.
pub(crate) const LOGIN_LOG: &str = include_str!("../fixtures/login.ndjson");

/// Pending and manual variants, a feature narrative, a hook failure and an
/// assertion with missing and null values.
pub(crate) const CATALOG_LOG: &str = include_str!("../fixtures/catalog.ndjson");

#[derive(Debug)]
pub(crate) struct Transcript {
    pub(crate) stdout: String,
    pub(crate) stderr: String,
    pub(crate) report: RunReport,
    pub(crate) result: Result<usize, EventLogError>,
}

pub(crate) fn replay_plain(log: &str) -> Transcript {
    replay_with(&ReporterBuilder::default(), log)
}

pub(crate) fn replay_with(builder: &ReporterBuilder, log: &str) -> Transcript {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let (report, result) = {
        let mut reporter = builder.build(ReporterOutput::Buffer {
            stdout: &mut stdout,
            stderr: &mut stderr,
        });
        let result = replay(log.as_bytes(), &mut reporter);
        (reporter.report().clone(), result)
    };
    Transcript {
        stdout: String::from_utf8(stdout).expect("output is UTF-8"),
        stderr: String::from_utf8(stderr).expect("output is UTF-8"),
        report,
        result,
    }
}
