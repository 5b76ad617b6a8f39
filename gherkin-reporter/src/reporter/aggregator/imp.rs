// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Level, NodeOutcome, RunReport, classify};
use crate::{
    helpers::plural,
    node::{Node, full_title},
    reporter::{
        events::{ReporterEvent, TestError},
        failure::FailureRecord,
    },
};
use tracing::{debug, warn};

/// Tracks statistics, coverage, failures and warnings across a run.
///
/// No tree is kept: each open feature, scenario or variant has a frame that
/// records what happened while it was open, and the frame is folded into the
/// counters when the node ends.
#[derive(Debug, Default)]
pub(crate) struct EventAggregator {
    report: RunReport,
    frames: Vec<Frame>,
}

#[derive(Clone, Copy, Debug)]
struct Frame {
    level: Level,
    failed: bool,
    any_passed: bool,
}

impl EventAggregator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn report(&self) -> &RunReport {
        &self.report
    }

    pub(crate) fn write_event(&mut self, event: ReporterEvent<'_>) {
        match event {
            ReporterEvent::RunStarted => {
                self.report = RunReport::default();
                self.frames.clear();
            }
            ReporterEvent::FeatureStarted { .. } => self.open(Level::Features),
            ReporterEvent::ScenarioStarted { .. } => self.open(Level::Scenarios),
            ReporterEvent::VariantStarted { .. } => self.open(Level::Variants),
            ReporterEvent::FeatureFinished { feature } => {
                self.close(event, Level::Features, feature);
            }
            ReporterEvent::ScenarioFinished { scenario } => {
                self.close(event, Level::Scenarios, scenario);
            }
            ReporterEvent::VariantFinished { variant } => {
                if let Some(outcome) = self.close(event, Level::Variants, variant) {
                    self.finish_variant(variant, outcome);
                }
            }
            ReporterEvent::StepPending { step } => {
                if step.manual {
                    self.report.stats.steps.manual += 1;
                }
            }
            ReporterEvent::StepStarted { .. } => {}
            ReporterEvent::StepPassed { .. } => {
                self.report.stats.steps.passed += 1;
                for frame in &mut self.frames {
                    frame.any_passed = true;
                }
            }
            ReporterEvent::StepFailed { step, error } => {
                self.report.stats.steps.failed += 1;
                self.record_failure(step, error);
            }
            ReporterEvent::HookFailed { hook, error } => {
                self.record_failure(hook, error);
            }
            ReporterEvent::RunFinished => {
                if !self.frames.is_empty() {
                    warn!(
                        "run finished with {} node(s) still open, their results are not counted",
                        self.frames.len(),
                    );
                    self.frames.clear();
                }
                let failures = self.report.failures.len();
                debug!(
                    "run finished with {failures} {}",
                    plural::failures_str(failures)
                );
            }
        }
    }

    fn open(&mut self, level: Level) {
        self.frames.push(Frame {
            level,
            failed: false,
            any_passed: false,
        });
    }

    /// Pops the innermost frame and counts the outcome of `node`.
    ///
    /// Returns `None` if no frame is open.
    fn close(
        &mut self,
        event: ReporterEvent<'_>,
        level: Level,
        node: &Node,
    ) -> Option<NodeOutcome> {
        let Some(frame) = self.frames.pop() else {
            warn!(
                "`{}` event for `{}` without a matching start, ignoring",
                event.name(),
                node.title,
            );
            return None;
        };
        if frame.level != level {
            warn!(
                "`{}` event for `{}` closes an open {} frame",
                event.name(),
                node.title,
                frame.level.name(),
            );
        }

        let outcome = frame.outcome(node);
        self.report.stats.level_mut(level).record(outcome);
        Some(outcome)
    }

    fn finish_variant(&mut self, variant: &Node, outcome: NodeOutcome) {
        if let Some(feature) = variant.owning_feature() {
            let coverage = self
                .report
                .coverage
                .entry(full_title(feature))
                .or_default();
            coverage.total += 1;
            if variant.manual {
                coverage.manual += 1;
            }
        }

        if let Some(warning) = classify(variant.bug_id.is_some(), outcome) {
            self.report.warnings.push(warning, full_title(variant));
        }
    }

    fn record_failure(&mut self, node: &Node, error: &TestError) {
        for frame in &mut self.frames {
            frame.failed = true;
        }
        let ordinal = self.report.failures.len() + 1;
        debug!(ordinal, "recording failure for `{}`", node.title);
        self.report.failures.push(FailureRecord {
            ordinal,
            full_title: full_title(node),
            error: error.clone(),
        });
    }
}

impl Frame {
    fn outcome(&self, node: &Node) -> NodeOutcome {
        if node.manual {
            NodeOutcome::Manual
        } else if self.failed {
            NodeOutcome::Failed
        } else if node.pending || !self.any_passed {
            NodeOutcome::Pending
        } else {
            NodeOutcome::Passed
        }
    }
}
