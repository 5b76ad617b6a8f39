// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregates events into statistics, coverage, failures and warnings.

mod imp;
mod stats;
mod warnings;

pub(crate) use imp::*;
pub use stats::*;
pub use warnings::*;
