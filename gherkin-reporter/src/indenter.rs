// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Support for indenting multi-line text by nesting level.
//!
//! Unlike a streaming indenter, every line is prefixed, including empty ones:
//! the transcript layout relies on indentation-only lines after feature titles.

use swrite::{SWrite, swrite};

/// The unit of indentation: one nesting level.
pub(crate) const INDENT_UNIT: &str = "  ";

/// Prefixes every line of `text` with `level` indentation units.
///
/// If `trim` is true, leading and trailing whitespace is stripped from each line
/// first. This is used for externally sourced text such as stack traces.
pub(crate) fn indent(text: &str, level: usize, trim: bool) -> String {
    let prefix = INDENT_UNIT.repeat(level);
    let mut out = String::with_capacity(text.len() + prefix.len());
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let line = if trim { line.trim() } else { line };
        swrite!(out, "{prefix}{line}");
    }
    out
}

/// The current nesting depth of the transcript.
///
/// Entered on every feature, scenario and variant start, and exited on the
/// matching end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct IndentLevel(usize);

impl IndentLevel {
    pub(crate) fn depth(self) -> usize {
        self.0
    }

    pub(crate) fn enter(&mut self) {
        self.0 += 1;
    }

    /// Leaves one level. Returns false if the level was already zero.
    pub(crate) fn exit(&mut self) -> bool {
        match self.0.checked_sub(1) {
            Some(depth) => {
                self.0 = depth;
                true
            }
            None => false,
        }
    }

    /// The level at which content of the innermost open node is rendered.
    pub(crate) fn content_level(self) -> usize {
        self.0.saturating_sub(1)
    }

    /// Indents `text` at [`Self::content_level`].
    pub(crate) fn indent(self, text: &str) -> String {
        indent(text, self.content_level(), false)
    }
}
