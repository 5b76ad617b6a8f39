// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::WarningLists;
use crate::reporter::failure::FailureRecord;
use indexmap::IndexMap;

/// The outcome of a feature, scenario or variant, decided at its end event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum NodeOutcome {
    /// At least one step passed and nothing failed.
    Passed,

    /// A step or hook failed while the node was open.
    Failed,

    /// The node is pending, or no step passed while it was open. Not counted.
    Pending,

    /// The node is flagged as manual.
    Manual,
}

/// A level of the test hierarchy that statistics are kept for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// Features.
    Features,
    /// Scenarios.
    Scenarios,
    /// Variants, dummy variants included.
    Variants,
    /// Steps.
    Steps,
}

impl Level {
    /// All levels, in summary table order.
    pub const ALL: [Level; 4] = [
        Level::Features,
        Level::Scenarios,
        Level::Variants,
        Level::Steps,
    ];

    /// The row name used in the summary table.
    pub fn name(self) -> &'static str {
        match self {
            Level::Features => "Features",
            Level::Scenarios => "Scenarios",
            Level::Variants => "Variants",
            Level::Steps => "Steps",
        }
    }
}

/// Counters for one level of the hierarchy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LevelStats {
    /// The number of passed nodes.
    pub passed: usize,

    /// The number of failed nodes.
    pub failed: usize,

    /// The number of manual nodes.
    pub manual: usize,
}

impl LevelStats {
    /// The number of automated nodes with a definite result.
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    pub(crate) fn record(&mut self, outcome: NodeOutcome) {
        match outcome {
            NodeOutcome::Passed => self.passed += 1,
            NodeOutcome::Failed => self.failed += 1,
            NodeOutcome::Manual => self.manual += 1,
            NodeOutcome::Pending => {}
        }
    }
}

/// Per-level statistics for a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Feature counters.
    pub features: LevelStats,

    /// Scenario counters.
    pub scenarios: LevelStats,

    /// Variant counters.
    pub variants: LevelStats,

    /// Step counters.
    pub steps: LevelStats,
}

impl RunStats {
    /// Returns the counters for `level`.
    pub fn level(&self, level: Level) -> &LevelStats {
        match level {
            Level::Features => &self.features,
            Level::Scenarios => &self.scenarios,
            Level::Variants => &self.variants,
            Level::Steps => &self.steps,
        }
    }

    pub(crate) fn level_mut(&mut self, level: Level) -> &mut LevelStats {
        match level {
            Level::Features => &mut self.features,
            Level::Scenarios => &mut self.scenarios,
            Level::Variants => &mut self.variants,
            Level::Steps => &mut self.steps,
        }
    }

    /// Iterates over the levels and their counters, in summary table order.
    pub fn levels(&self) -> impl Iterator<Item = (Level, &LevelStats)> {
        Level::ALL.into_iter().map(|level| (level, self.level(level)))
    }
}

/// The number of variants observed for one feature.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeatureCoverage {
    /// All variants, manual ones included.
    pub total: usize,

    /// Manual variants.
    pub manual: usize,
}

/// Variant counts keyed by feature full title, in first-seen order.
pub type CoverageMap = IndexMap<String, FeatureCoverage>;

/// Everything the aggregator knows about a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunReport {
    /// Per-level counters.
    pub stats: RunStats,

    /// Variants per feature.
    pub coverage: CoverageMap,

    /// Failures, in ordinal order.
    pub failures: Vec<FailureRecord>,

    /// Bug-tag warnings.
    pub warnings: WarningLists,
}
