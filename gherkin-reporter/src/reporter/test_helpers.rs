// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test helpers for building event streams and generating run shapes.

use super::{
    RunReport,
    events::{OwnedReporterEvent, TestError},
    imp::{Reporter, ReporterBuilder, ReporterOutput},
};
use crate::node::{Node, NodeKind};
use proptest::{collection::vec, prelude::*};
use std::{sync::Arc, time::Duration};

/// Builds a well-nested event stream. Parents are filled in automatically.
#[derive(Debug)]
pub(crate) struct Script {
    events: Vec<OwnedReporterEvent>,
    open: Vec<Arc<Node>>,
}

impl Script {
    pub(crate) fn new() -> Self {
        Self {
            events: vec![OwnedReporterEvent::RunStarted],
            open: Vec::new(),
        }
    }

    fn attach(&self, node: Node) -> Arc<Node> {
        match self.open.last() {
            Some(parent) => Arc::new(node.with_parent(parent.clone())),
            None => Arc::new(node),
        }
    }

    fn open(&mut self, node: Node, event: fn(Arc<Node>) -> OwnedReporterEvent) -> &mut Self {
        let node = self.attach(node);
        self.events.push(event(node.clone()));
        self.open.push(node);
        self
    }

    pub(crate) fn feature(&mut self, node: Node) -> &mut Self {
        self.open(node, OwnedReporterEvent::FeatureStarted)
    }

    pub(crate) fn scenario(&mut self, node: Node) -> &mut Self {
        self.open(node, OwnedReporterEvent::ScenarioStarted)
    }

    pub(crate) fn variant(&mut self, node: Node) -> &mut Self {
        self.open(node, OwnedReporterEvent::VariantStarted)
    }

    /// Closes the innermost open node.
    pub(crate) fn end(&mut self) -> &mut Self {
        let node = self.open.pop().expect("a node is open");
        let event = match node.kind {
            NodeKind::Feature => OwnedReporterEvent::FeatureFinished(node),
            NodeKind::Scenario => OwnedReporterEvent::ScenarioFinished(node),
            NodeKind::Variant { .. } => OwnedReporterEvent::VariantFinished(node),
            NodeKind::Step | NodeKind::Hook { .. } => panic!("steps and hooks are never open"),
        };
        self.events.push(event);
        self
    }

    pub(crate) fn pending_step(&mut self, node: Node) -> &mut Self {
        let step = self.attach(node);
        self.events.push(OwnedReporterEvent::StepPending(step));
        self
    }

    pub(crate) fn passing_step(&mut self, title: &str, millis: u64) -> &mut Self {
        let step = self.attach(Node::step(title));
        self.events.push(OwnedReporterEvent::StepStarted(step.clone()));
        self.events
            .push(OwnedReporterEvent::StepPassed(step, Duration::from_millis(millis)));
        self
    }

    pub(crate) fn failing_step(&mut self, title: &str, error: TestError) -> &mut Self {
        let step = self.attach(Node::step(title));
        self.events.push(OwnedReporterEvent::StepStarted(step.clone()));
        self.events.push(OwnedReporterEvent::StepFailed(step, error));
        self
    }

    pub(crate) fn hook_failure(&mut self, subtype: &str, error: TestError) -> &mut Self {
        let hook = self.attach(Node::hook(subtype));
        self.events.push(OwnedReporterEvent::HookFailed(hook, error));
        self
    }

    /// Closes every open node and ends the run.
    pub(crate) fn finish(&mut self) -> Vec<OwnedReporterEvent> {
        while !self.open.is_empty() {
            self.end();
        }
        self.events.push(OwnedReporterEvent::RunFinished);
        std::mem::take(&mut self.events)
    }
}

/// The output of a run written to in-memory buffers.
#[derive(Debug)]
pub(crate) struct Transcript {
    pub(crate) stdout: String,
    pub(crate) stderr: String,
    pub(crate) report: RunReport,
}

/// Feeds `events` through a plain-output reporter.
pub(crate) fn run_plain(events: &[OwnedReporterEvent]) -> Transcript {
    run_with(&ReporterBuilder::default(), events)
}

pub(crate) fn run_with(builder: &ReporterBuilder, events: &[OwnedReporterEvent]) -> Transcript {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let report = {
        let mut reporter: Reporter<'_> = builder.build(ReporterOutput::Buffer {
            stdout: &mut stdout,
            stderr: &mut stderr,
        });
        for event in events {
            reporter
                .report_event(event.as_event())
                .expect("writing to a buffer succeeds");
        }
        reporter.report().clone()
    };
    Transcript {
        stdout: String::from_utf8(stdout).expect("output is UTF-8"),
        stderr: String::from_utf8(stderr).expect("output is UTF-8"),
        report,
    }
}

// ---
// Generated run shapes
// ---

#[derive(Clone, Copy, Debug)]
pub(crate) enum StepShape {
    Pending,
    Manual,
    Pass,
    Fail,
    HookFail,
}

#[derive(Clone, Debug)]
pub(crate) struct VariantShape {
    pub(crate) manual: bool,
    pub(crate) bug: bool,
    pub(crate) steps: Vec<StepShape>,
}

#[derive(Clone, Debug)]
pub(crate) struct ScenarioShape {
    /// Empty for scenarios that run a single dummy variant.
    pub(crate) variants: Vec<VariantShape>,
    pub(crate) dummy_steps: Vec<StepShape>,
}

#[derive(Clone, Debug)]
pub(crate) struct FeatureShape {
    pub(crate) manual: bool,
    pub(crate) scenarios: Vec<ScenarioShape>,
}

fn arb_step_shape() -> impl Strategy<Value = StepShape> {
    prop_oneof![
        Just(StepShape::Pending),
        Just(StepShape::Manual),
        Just(StepShape::Pass),
        Just(StepShape::Fail),
        Just(StepShape::HookFail),
    ]
}

fn arb_variant_shape() -> impl Strategy<Value = VariantShape> {
    (any::<bool>(), any::<bool>(), vec(arb_step_shape(), 0..4))
        .prop_map(|(manual, bug, steps)| VariantShape { manual, bug, steps })
}

fn arb_scenario_shape() -> impl Strategy<Value = ScenarioShape> {
    (
        vec(arb_variant_shape(), 0..3),
        vec(arb_step_shape(), 0..4),
    )
        .prop_map(|(variants, dummy_steps)| ScenarioShape {
            variants,
            dummy_steps,
        })
}

pub(crate) fn arb_run_shape() -> impl Strategy<Value = Vec<FeatureShape>> {
    vec(
        (any::<bool>(), vec(arb_scenario_shape(), 0..3))
            .prop_map(|(manual, scenarios)| FeatureShape { manual, scenarios }),
        0..3,
    )
}

/// Expands generated shapes into a script.
pub(crate) fn script_for(features: &[FeatureShape]) -> Vec<OwnedReporterEvent> {
    let mut script = Script::new();
    for (f, feature) in features.iter().enumerate() {
        script.feature(
            Node::feature(format!("Feature {f}"))
                .with_manual(feature.manual)
                .with_child_suites(feature.scenarios.len(), false),
        );
        for (s, scenario) in feature.scenarios.iter().enumerate() {
            script.scenario(Node::scenario(format!("Scenario {s}")));
            if scenario.variants.is_empty() {
                script.variant(Node::dummy_variant());
                add_steps(&mut script, &scenario.dummy_steps);
                script.end();
            }
            for (v, variant) in scenario.variants.iter().enumerate() {
                let mut node = Node::variant(format!("Variant {v}")).with_manual(variant.manual);
                if variant.bug {
                    node = node.with_bug_id(format!("BUG-{v}"));
                }
                script.variant(node);
                add_steps(&mut script, &variant.steps);
                script.end();
            }
            script.end();
        }
        script.end();
    }
    script.finish()
}

fn add_steps(script: &mut Script, steps: &[StepShape]) {
    for (i, step) in steps.iter().enumerate() {
        let title = format!("Given: step {i}");
        match step {
            StepShape::Pending => {
                script.pending_step(Node::step(title).with_pending(true));
            }
            StepShape::Manual => {
                script.pending_step(Node::step(title).with_manual(true));
            }
            StepShape::Pass => {
                script.passing_step(&title, 3);
            }
            StepShape::Fail => {
                script.failing_step(&title, TestError::new("Error", format!("step {i} broke")));
            }
            StepShape::HookFail => {
                script.hook_failure("before each", TestError::new("Error", "hook broke"));
            }
        }
    }
}
