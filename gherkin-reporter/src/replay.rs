// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Replays a recorded event log through a [`Reporter`].
//!
//! An event log is newline-delimited JSON: one event object per line, tagged
//! with the engine's event name.
//!
//! ```text
//! {"event": "start"}
//! {"event": "feature", "node": {"id": "f1", "kind": "feature", "title": "Login"}}
//! {"event": "step", "node": {"id": "s1", "parent": "v1", "kind": "step", "title": "Given: a user"}}
//! {"event": "step pass", "node": "s1", "duration": 12}
//! ```
//!
//! Nodes are defined inline the first time they are mentioned, and referred
//! to by id afterwards. A definition names its parent by id, and the parent
//! must have been defined on an earlier line.

use crate::{
    errors::EventLogError,
    helpers::plural,
    node::{Node, NodeKind},
    reporter::{CapturedValue, OwnedReporterEvent, Reporter, TestError},
};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::{collections::HashMap, io::BufRead, sync::Arc, time::Duration};
use tracing::debug;

/// Replays every event in `reader` through `reporter`.
///
/// Returns the number of events replayed.
pub fn replay(reader: impl BufRead, reporter: &mut Reporter<'_>) -> Result<usize, EventLogError> {
    EventLogReplayer::new().replay(reader, reporter)
}

/// Decodes event log lines into [`OwnedReporterEvent`]s.
///
/// The replayer remembers every node defined so far, so lines must be fed in
/// log order.
#[derive(Debug, Default)]
pub struct EventLogReplayer {
    nodes: HashMap<String, Arc<Node>>,
}

impl EventLogReplayer {
    /// Creates a replayer with no known nodes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replays every event in `reader` through `reporter`, returning the
    /// number of events replayed.
    pub fn replay(
        &mut self,
        reader: impl BufRead,
        reporter: &mut Reporter<'_>,
    ) -> Result<usize, EventLogError> {
        let mut count = 0;
        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line.map_err(EventLogError::Read)?;
            let Some(event) = self.decode_line(line_number, &line)? else {
                continue;
            };
            reporter
                .report_event(event.as_event())
                .map_err(|error| EventLogError::Report {
                    line: line_number,
                    error,
                })?;
            count += 1;
        }

        debug!(
            "replayed {count} {} ({} nodes defined)",
            plural::events_str(count),
            self.nodes.len(),
        );
        Ok(count)
    }

    /// Decodes a single line of the log.
    ///
    /// Returns `Ok(None)` for blank lines. `line_number` is 1-based and only
    /// used for error reporting.
    pub fn decode_line(
        &mut self,
        line_number: usize,
        line: &str,
    ) -> Result<Option<OwnedReporterEvent>, EventLogError> {
        if line.trim().is_empty() {
            return Ok(None);
        }
        let event: LogEvent = serde_json::from_str(line).map_err(|error| EventLogError::Parse {
            line: line_number,
            error,
        })?;
        self.resolve_event(line_number, event).map(Some)
    }

    fn resolve_event(
        &mut self,
        line: usize,
        event: LogEvent,
    ) -> Result<OwnedReporterEvent, EventLogError> {
        let event = match event {
            LogEvent::Start => OwnedReporterEvent::RunStarted,
            LogEvent::Feature { node } => {
                OwnedReporterEvent::FeatureStarted(self.node(line, "feature", node, "feature")?)
            }
            LogEvent::FeatureEnd { node } => {
                OwnedReporterEvent::FeatureFinished(self.node(line, "feature end", node, "feature")?)
            }
            LogEvent::Scenario { node } => {
                OwnedReporterEvent::ScenarioStarted(self.node(line, "scenario", node, "scenario")?)
            }
            LogEvent::ScenarioEnd { node } => OwnedReporterEvent::ScenarioFinished(self.node(
                line,
                "scenario end",
                node,
                "scenario",
            )?),
            LogEvent::Variant { node } => {
                OwnedReporterEvent::VariantStarted(self.node(line, "variant", node, "variant")?)
            }
            LogEvent::VariantEnd { node } => {
                OwnedReporterEvent::VariantFinished(self.node(line, "variant end", node, "variant")?)
            }
            LogEvent::StepPending { node } => {
                OwnedReporterEvent::StepPending(self.node(line, "step pending", node, "step")?)
            }
            LogEvent::Step { node } => {
                OwnedReporterEvent::StepStarted(self.node(line, "step", node, "step")?)
            }
            LogEvent::StepPass { node, duration } => OwnedReporterEvent::StepPassed(
                self.node(line, "step pass", node, "step")?,
                Duration::from_millis(duration),
            ),
            LogEvent::StepFail { node, error } => OwnedReporterEvent::StepFailed(
                self.node(line, "step fail", node, "step")?,
                error.into(),
            ),
            LogEvent::HookFail { node, error } => OwnedReporterEvent::HookFailed(
                self.node(line, "hook fail", node, "hook")?,
                error.into(),
            ),
            LogEvent::End => OwnedReporterEvent::RunFinished,
        };
        Ok(event)
    }

    /// Resolves a node reference, then checks that it has the expected kind.
    fn node(
        &mut self,
        line: usize,
        event: &'static str,
        node: NodeRef,
        expected: &'static str,
    ) -> Result<Arc<Node>, EventLogError> {
        let node = match node {
            NodeRef::Id(id) => match self.nodes.get(&id) {
                Some(node) => node.clone(),
                None => return Err(EventLogError::UnknownNode { line, id }),
            },
            NodeRef::Definition(definition) => self.define(line, definition)?,
        };

        let found = node.kind.name();
        if found != expected {
            return Err(EventLogError::KindMismatch {
                line,
                event,
                expected,
                found,
            });
        }
        Ok(node)
    }

    fn define(
        &mut self,
        line: usize,
        definition: NodeDefinition,
    ) -> Result<Arc<Node>, EventLogError> {
        let parent = match &definition.parent {
            Some(parent) => match self.nodes.get(parent) {
                Some(parent) => Some(parent.clone()),
                None => {
                    return Err(EventLogError::UnknownParent {
                        line,
                        id: definition.id,
                        parent: parent.clone(),
                    });
                }
            },
            None => None,
        };

        let id = definition.id.clone();
        if self.nodes.contains_key(&id) {
            debug!("line {line}: node `{id}` redefined");
        }
        let mut node = definition.into_node();
        node.parent = parent;
        let node = Arc::new(node);
        self.nodes.insert(id, node.clone());
        Ok(node)
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "event")]
enum LogEvent {
    #[serde(rename = "start")]
    Start,
    #[serde(rename = "feature")]
    Feature { node: NodeRef },
    #[serde(rename = "feature end")]
    FeatureEnd { node: NodeRef },
    #[serde(rename = "scenario")]
    Scenario { node: NodeRef },
    #[serde(rename = "scenario end")]
    ScenarioEnd { node: NodeRef },
    #[serde(rename = "variant")]
    Variant { node: NodeRef },
    #[serde(rename = "variant end")]
    VariantEnd { node: NodeRef },
    #[serde(rename = "step pending")]
    StepPending { node: NodeRef },
    #[serde(rename = "step")]
    Step { node: NodeRef },
    #[serde(rename = "step pass")]
    StepPass {
        node: NodeRef,
        /// Milliseconds.
        #[serde(default)]
        duration: u64,
    },
    #[serde(rename = "step fail")]
    StepFail {
        node: NodeRef,
        #[serde(default)]
        error: LogError,
    },
    #[serde(rename = "hook fail")]
    HookFail {
        node: NodeRef,
        #[serde(default)]
        error: LogError,
    },
    #[serde(rename = "end")]
    End,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NodeRef {
    Id(String),
    Definition(NodeDefinition),
}

#[derive(Debug, Deserialize)]
struct NodeDefinition {
    id: String,
    #[serde(default)]
    parent: Option<String>,
    #[serde(flatten)]
    kind: LogNodeKind,
    #[serde(default)]
    title: String,
    #[serde(default)]
    pending: bool,
    #[serde(default)]
    manual: bool,
    #[serde(default)]
    bug_id: Option<String>,
    #[serde(default)]
    subtitle: Vec<String>,
    #[serde(default)]
    child_suites: usize,
    #[serde(default)]
    ends_with_empty_suite: bool,
}

impl NodeDefinition {
    fn into_node(self) -> Node {
        let node = match self.kind {
            LogNodeKind::Feature => Node::feature(self.title),
            LogNodeKind::Scenario => Node::scenario(self.title),
            LogNodeKind::Variant { dummy: true } => Node::dummy_variant(),
            LogNodeKind::Variant { dummy: false } => Node::variant(self.title),
            LogNodeKind::Step => Node::step(self.title),
            LogNodeKind::Hook { subtype } => Node::hook(subtype),
        };
        let node = node
            .with_pending(self.pending)
            .with_manual(self.manual)
            .with_subtitle(self.subtitle)
            .with_child_suites(self.child_suites, self.ends_with_empty_suite);
        match self.bug_id {
            Some(bug_id) => node.with_bug_id(bug_id),
            None => node,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum LogNodeKind {
    Feature,
    Scenario,
    Variant {
        #[serde(default)]
        dummy: bool,
    },
    Step,
    Hook {
        subtype: String,
    },
}

#[derive(Debug, Default, Deserialize)]
struct LogError {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    message: String,
    #[serde(default)]
    stack: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    actual: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    expected: Option<Value>,
    #[serde(default)]
    uncaught: bool,
}

/// Distinguishes a field set to `null` from a missing field: the former is
/// `Some(Value::Null)`, the latter falls back to `None`.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn captured(value: Option<Value>) -> CapturedValue {
    value.map_or(CapturedValue::Undefined, CapturedValue::from_json)
}

impl From<LogError> for TestError {
    fn from(error: LogError) -> Self {
        let mut test_error = TestError::new(
            error.name.unwrap_or_else(|| "Error".to_owned()),
            error.message,
        )
        .with_uncaught(error.uncaught);
        test_error.stack = error.stack;
        test_error.actual = captured(error.actual);
        test_error.expected = captured(error.expected);
        test_error
    }
}
