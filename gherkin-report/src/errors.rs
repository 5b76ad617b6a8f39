// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::{NO_HEADING_TARGET, StderrStyles};
use camino::Utf8PathBuf;
use gherkin_reporter::errors::{EventLogError, UserConfigError};
use owo_colors::OwoColorize;
use std::error::Error;
use thiserror::Error;
use tracing::error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

/// Exit codes returned by gherkin-report.
pub enum ReportExitCode {}

impl ReportExitCode {
    /// The run was replayed and no failures were recorded.
    pub const OK: i32 = 0;

    /// The run was replayed and at least one step or hook failed.
    pub const RUN_FAILED: i32 = 100;

    /// The event log could not be decoded.
    pub const EVENT_LOG_INVALID: i32 = 105;

    /// Writing the report to stdout or stderr produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;

    /// Configuration or input could not be set up.
    pub const SETUP_ERROR: i32 = 96;
}

// The #[error()] strings are placeholders: errors are meant to be printed with
// display_to_stderr, which colorizes them.

/// An error that stopped gherkin-report before the run could be reported.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("user config error")]
    UserConfigError {
        #[from]
        err: UserConfigError,
    },
    #[error("failed to open event log")]
    EventLogOpenError {
        path: Utf8PathBuf,
        #[source]
        err: std::io::Error,
    },
    #[error("failed to replay event log")]
    EventLogError {
        path: Utf8PathBuf,
        #[source]
        err: EventLogError,
    },
}

impl ExpectedError {
    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::UserConfigError { .. } | Self::EventLogOpenError { .. } => {
                ReportExitCode::SETUP_ERROR
            }
            Self::EventLogError {
                err: EventLogError::Report { .. },
                ..
            } => ReportExitCode::WRITE_OUTPUT_ERROR,
            Self::EventLogError { .. } => ReportExitCode::EVENT_LOG_INVALID,
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match &self {
            Self::UserConfigError { err } => {
                error!("failed to load user config");
                Some(err as &dyn Error)
            }
            Self::EventLogOpenError { path, err } => {
                error!("failed to open event log at {}", path.style(styles.bold));
                Some(err as &dyn Error)
            }
            Self::EventLogError { path, err } => {
                error!("failed to replay event log {}", path.style(styles.bold));
                Some(err as &dyn Error)
            }
        };

        while let Some(err) = next_error {
            error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gherkin_reporter::errors::WriteEventError;
    use std::io;

    #[test]
    fn exit_codes() {
        let open = ExpectedError::EventLogOpenError {
            path: "run.ndjson".into(),
            err: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(open.process_exit_code(), ReportExitCode::SETUP_ERROR);

        let unknown = ExpectedError::EventLogError {
            path: "run.ndjson".into(),
            err: EventLogError::UnknownNode {
                line: 3,
                id: "f".to_owned(),
            },
        };
        assert_eq!(
            unknown.process_exit_code(),
            ReportExitCode::EVENT_LOG_INVALID
        );

        let write = ExpectedError::EventLogError {
            path: "-".into(),
            err: EventLogError::Report {
                line: 1,
                error: WriteEventError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "closed")),
            },
        };
        assert_eq!(
            write.process_exit_code(),
            ReportExitCode::WRITE_OUTPUT_ERROR
        );
    }
}
