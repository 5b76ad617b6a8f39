// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Report a Gherkin-style test run.
//!
//! The main type here is [`Reporter`], which is constructed via a [`ReporterBuilder`].

mod aggregator;
mod displayer;
mod events;
mod failure;
mod helpers;
mod imp;
#[cfg(test)]
mod test_helpers;

pub use aggregator::{
    CoverageMap, FeatureCoverage, Level, LevelStats, NodeOutcome, RunReport, RunStats,
    VariantWarning, WarningLists, classify,
};
pub use events::*;
pub use failure::FailureRecord;
pub use helpers::{StyleRole, Theme, resolve};
pub use imp::*;
