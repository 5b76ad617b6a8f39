// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::events::TestError;

/// A failed step or hook, recorded for the failure appendix.
#[derive(Clone, Debug, PartialEq)]
pub struct FailureRecord {
    /// The 1-based failure number, shared by steps and hooks.
    pub ordinal: usize,

    /// The full title of the failed step or hook.
    pub full_title: String,

    /// The error reported by the engine.
    pub error: TestError,
}
