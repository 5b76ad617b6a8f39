// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! General support code for gherkin-reporter.

use std::fmt;

/// Right-aligns `s` inside a field `width` characters wide, filling with `fill`.
///
/// Strings wider than the field are never truncated: the field grows instead.
pub(crate) fn pad(s: impl fmt::Display, width: usize, fill: char) -> String {
    let s = s.to_string();
    let len = s.chars().count();
    let mut out = String::with_capacity(width.max(len));
    out.extend(std::iter::repeat_n(fill, width.saturating_sub(len)));
    out.push_str(&s);
    out
}

/// A step title split into its keyword label and its text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct StepTitle<'a> {
    pub(crate) label: &'a str,
    /// `None` if the title has no `": "` separator.
    pub(crate) text: Option<&'a str>,
}

impl<'a> StepTitle<'a> {
    const SEPARATOR: &'static str = ": ";

    /// Splits a step title such as `"Given: a user"` at the first separator.
    ///
    /// Titles without a separator are treated as a whole-string label.
    pub(crate) fn split(title: &'a str) -> Self {
        match title.split_once(Self::SEPARATOR) {
            Some((label, text)) => Self {
                label,
                text: Some(text),
            },
            None => Self {
                label: title,
                text: None,
            },
        }
    }
}

/// Utilities for pluralizing various words based on count.
pub(crate) mod plural {
    /// Returns "failure" if `count` is 1, otherwise "failures".
    pub(crate) fn failures_str(count: usize) -> &'static str {
        if count == 1 { "failure" } else { "failures" }
    }

    /// Returns "event" if `count` is 1, otherwise "events".
    pub(crate) fn events_str(count: usize) -> &'static str {
        if count == 1 { "event" } else { "events" }
    }
}
