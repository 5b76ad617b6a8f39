// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The displayer for the human-readable transcript.

mod formatters;
mod imp;
mod inspect;

pub(crate) use imp::*;
