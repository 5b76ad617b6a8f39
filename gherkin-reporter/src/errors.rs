// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by gherkin-reporter.
//!
//! Test failures reported by the engine are data, not errors: they are recorded
//! and rendered by the reporter. The types here cover faults of the reporter's
//! own surroundings: output streams, event logs and configuration files.

use camino::{FromPathBufError, Utf8PathBuf};
use thiserror::Error;

/// An error that occurs while writing an event.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteEventError {
    /// An error occurred while writing the event to the provided output.
    #[error("error writing to output")]
    Io(#[source] std::io::Error),
}

/// An error that occurs while decoding an event log.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EventLogError {
    /// An error occurred while reading the event log.
    #[error("error reading event log")]
    Read(#[source] std::io::Error),

    /// A line of the event log is not a valid event.
    #[error("line {line}: invalid event")]
    Parse {
        /// The 1-based line number.
        line: usize,

        /// The underlying JSON error.
        #[source]
        error: serde_json::Error,
    },

    /// An event references a node id that was never defined.
    #[error("line {line}: unknown node id `{id}`")]
    UnknownNode {
        /// The 1-based line number.
        line: usize,

        /// The node id.
        id: String,
    },

    /// A node definition names a parent id that was never defined.
    #[error("line {line}: node `{id}` has unknown parent `{parent}`")]
    UnknownParent {
        /// The 1-based line number.
        line: usize,

        /// The node being defined.
        id: String,

        /// The missing parent id.
        parent: String,
    },

    /// An event carries a node of the wrong kind, e.g. a `scenario` event with
    /// a step node.
    #[error("line {line}: `{event}` event expects a {expected} node, found a {found} node")]
    KindMismatch {
        /// The 1-based line number.
        line: usize,

        /// The event name.
        event: &'static str,

        /// The expected node kind.
        expected: &'static str,

        /// The node kind found.
        found: &'static str,
    },

    /// The reporter failed to write the event.
    #[error("line {line}: error reporting event")]
    Report {
        /// The 1-based line number.
        line: usize,

        /// The underlying write error.
        #[source]
        error: WriteEventError,
    },
}

/// An error that occurs while loading user configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UserConfigError {
    /// The user config file specified explicitly was not found.
    #[error("user config file not found at {path}")]
    FileNotFound {
        /// The path that was checked.
        path: Utf8PathBuf,
    },

    /// Failed to read the user config file.
    #[error("failed to read user config at {path}")]
    Read {
        /// The path to the config file.
        path: Utf8PathBuf,

        /// The underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// Failed to parse the user config file.
    #[error("failed to parse user config at {path}")]
    Parse {
        /// The path to the config file.
        path: Utf8PathBuf,

        /// The underlying TOML parse error.
        #[source]
        error: toml::de::Error,
    },

    /// The user config directory is not valid UTF-8.
    #[error("user config path contains non-UTF-8 characters")]
    NonUtf8Path {
        /// The underlying error.
        #[source]
        error: FromPathBufError,
    },
}
