// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::node::Node;
use serde_json::Value;
use std::{borrow::Cow, sync::Arc, time::Duration};

/// A lifecycle event emitted by the test engine.
///
/// Events arrive strictly ordered: a node's start event precedes all events of
/// its descendants, which precede its own end event. Sibling order is emission
/// order.
#[derive(Clone, Copy, Debug)]
pub enum ReporterEvent<'a> {
    /// The run started.
    RunStarted,

    /// A feature started.
    FeatureStarted {
        /// The feature node.
        feature: &'a Node,
    },

    /// A feature finished.
    FeatureFinished {
        /// The feature node.
        feature: &'a Node,
    },

    /// A scenario started.
    ScenarioStarted {
        /// The scenario node.
        scenario: &'a Node,
    },

    /// A scenario finished.
    ScenarioFinished {
        /// The scenario node.
        scenario: &'a Node,
    },

    /// A variant started.
    VariantStarted {
        /// The variant node.
        variant: &'a Node,
    },

    /// A variant finished.
    VariantFinished {
        /// The variant node.
        variant: &'a Node,
    },

    /// A step was skipped because it is pending (or manual).
    StepPending {
        /// The step node.
        step: &'a Node,
    },

    /// A step started running.
    StepStarted {
        /// The step node.
        step: &'a Node,
    },

    /// A step passed.
    StepPassed {
        /// The step node.
        step: &'a Node,

        /// The time the step took.
        duration: Duration,
    },

    /// A step failed.
    StepFailed {
        /// The step node.
        step: &'a Node,

        /// The error the step failed with.
        error: &'a TestError,
    },

    /// A setup or teardown hook failed.
    HookFailed {
        /// The hook node.
        hook: &'a Node,

        /// The error the hook failed with.
        error: &'a TestError,
    },

    /// The run finished.
    RunFinished,
}

impl ReporterEvent<'_> {
    /// Returns the name of this event in event logs.
    pub fn name(&self) -> &'static str {
        match self {
            ReporterEvent::RunStarted => "start",
            ReporterEvent::FeatureStarted { .. } => "feature",
            ReporterEvent::FeatureFinished { .. } => "feature end",
            ReporterEvent::ScenarioStarted { .. } => "scenario",
            ReporterEvent::ScenarioFinished { .. } => "scenario end",
            ReporterEvent::VariantStarted { .. } => "variant",
            ReporterEvent::VariantFinished { .. } => "variant end",
            ReporterEvent::StepPending { .. } => "step pending",
            ReporterEvent::StepStarted { .. } => "step",
            ReporterEvent::StepPassed { .. } => "step pass",
            ReporterEvent::StepFailed { .. } => "step fail",
            ReporterEvent::HookFailed { .. } => "hook fail",
            ReporterEvent::RunFinished => "end",
        }
    }
}

/// A [`ReporterEvent`] that owns its payloads.
///
/// Useful when events are decoded from a log rather than emitted by a live
/// engine: node handles keep the parent chain alive.
#[derive(Clone, Debug)]
pub enum OwnedReporterEvent {
    /// See [`ReporterEvent::RunStarted`].
    RunStarted,
    /// See [`ReporterEvent::FeatureStarted`].
    FeatureStarted(Arc<Node>),
    /// See [`ReporterEvent::FeatureFinished`].
    FeatureFinished(Arc<Node>),
    /// See [`ReporterEvent::ScenarioStarted`].
    ScenarioStarted(Arc<Node>),
    /// See [`ReporterEvent::ScenarioFinished`].
    ScenarioFinished(Arc<Node>),
    /// See [`ReporterEvent::VariantStarted`].
    VariantStarted(Arc<Node>),
    /// See [`ReporterEvent::VariantFinished`].
    VariantFinished(Arc<Node>),
    /// See [`ReporterEvent::StepPending`].
    StepPending(Arc<Node>),
    /// See [`ReporterEvent::StepStarted`].
    StepStarted(Arc<Node>),
    /// See [`ReporterEvent::StepPassed`].
    StepPassed(Arc<Node>, Duration),
    /// See [`ReporterEvent::StepFailed`].
    StepFailed(Arc<Node>, TestError),
    /// See [`ReporterEvent::HookFailed`].
    HookFailed(Arc<Node>, TestError),
    /// See [`ReporterEvent::RunFinished`].
    RunFinished,
}

impl OwnedReporterEvent {
    /// Borrows this event as a [`ReporterEvent`].
    pub fn as_event(&self) -> ReporterEvent<'_> {
        match self {
            Self::RunStarted => ReporterEvent::RunStarted,
            Self::FeatureStarted(feature) => ReporterEvent::FeatureStarted { feature },
            Self::FeatureFinished(feature) => ReporterEvent::FeatureFinished { feature },
            Self::ScenarioStarted(scenario) => ReporterEvent::ScenarioStarted { scenario },
            Self::ScenarioFinished(scenario) => ReporterEvent::ScenarioFinished { scenario },
            Self::VariantStarted(variant) => ReporterEvent::VariantStarted { variant },
            Self::VariantFinished(variant) => ReporterEvent::VariantFinished { variant },
            Self::StepPending(step) => ReporterEvent::StepPending { step },
            Self::StepStarted(step) => ReporterEvent::StepStarted { step },
            Self::StepPassed(step, duration) => ReporterEvent::StepPassed {
                step,
                duration: *duration,
            },
            Self::StepFailed(step, error) => ReporterEvent::StepFailed { step, error },
            Self::HookFailed(hook, error) => ReporterEvent::HookFailed { hook, error },
            Self::RunFinished => ReporterEvent::RunFinished,
        }
    }
}

/// An error reported by the engine for a failing step or hook.
#[derive(Clone, Debug, PartialEq)]
pub struct TestError {
    /// The error's name, e.g. `"AssertionError"`.
    pub name: String,

    /// The error message. Empty if the engine supplied none.
    pub message: String,

    /// The stack trace, if any. Stack traces usually begin with the message.
    pub stack: Option<String>,

    /// The actual value of an assertion mismatch.
    pub actual: CapturedValue,

    /// The expected value of an assertion mismatch.
    pub expected: CapturedValue,

    /// True if the error was not caught by the step or hook itself.
    pub uncaught: bool,
}

impl TestError {
    /// The error name used for assertion mismatches.
    pub const ASSERTION_ERROR: &'static str = "AssertionError";

    /// Creates a new error with the given name and message.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: None,
            actual: CapturedValue::Undefined,
            expected: CapturedValue::Undefined,
            uncaught: false,
        }
    }

    /// Creates an assertion mismatch between `expected` and `actual`.
    pub fn assertion(
        message: impl Into<String>,
        expected: CapturedValue,
        actual: CapturedValue,
    ) -> Self {
        Self {
            expected,
            actual,
            ..Self::new(Self::ASSERTION_ERROR, message)
        }
    }

    /// Sets the stack trace.
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Marks the error as uncaught.
    pub fn with_uncaught(mut self, uncaught: bool) -> Self {
        self.uncaught = uncaught;
        self
    }

    /// Returns true if this error is an assertion-style mismatch.
    pub fn is_assertion(&self) -> bool {
        self.name == Self::ASSERTION_ERROR
    }

    /// Returns the name to display, with an `Uncaught ` prefix for uncaught errors.
    pub fn display_name(&self) -> Cow<'_, str> {
        if self.uncaught {
            Cow::Owned(format!("Uncaught {}", self.name))
        } else {
            Cow::Borrowed(&self.name)
        }
    }

    /// Returns the stack trace with the leading message removed.
    ///
    /// Everything up to and including the first occurrence of the message, plus
    /// the character following it (normally a newline), is stripped. The stack
    /// is returned unchanged if the message is empty or does not occur in it.
    /// Without a stack the result is empty, since the message is already
    /// shown above the stack.
    pub fn stack_without_message(&self) -> &str {
        let Some(stack) = self.stack.as_deref() else {
            return "";
        };
        if self.message.is_empty() {
            return stack;
        }
        match stack.find(&self.message) {
            Some(index) => {
                let rest = &stack[index + self.message.len()..];
                let mut chars = rest.chars();
                chars.next();
                chars.as_str()
            }
            None => stack,
        }
    }
}

/// A value captured by an assertion, as reported by the engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CapturedValue {
    /// The engine reported an explicit null.
    Null,

    /// The engine reported no value.
    #[default]
    Undefined,

    /// A binary payload. Rendered as its (lossy) UTF-8 decoding.
    Bytes(Vec<u8>),

    /// Any other value, rendered with a structural inspector.
    Structured(Value),
}

impl CapturedValue {
    /// Converts a JSON value into a captured value.
    ///
    /// JSON `null` becomes [`CapturedValue::Null`], and a serialized buffer of
    /// the form `{"type": "Buffer", "data": [...]}` becomes
    /// [`CapturedValue::Bytes`].
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => CapturedValue::Null,
            Value::Object(map) => match buffer_bytes(&map) {
                Some(bytes) => CapturedValue::Bytes(bytes),
                None => CapturedValue::Structured(Value::Object(map)),
            },
            other => CapturedValue::Structured(other),
        }
    }
}

fn buffer_bytes(map: &serde_json::Map<String, Value>) -> Option<Vec<u8>> {
    if map.len() != 2 || map.get("type").and_then(Value::as_str) != Some("Buffer") {
        return None;
    }
    map.get("data")?
        .as_array()?
        .iter()
        .map(|byte| byte.as_u64().and_then(|b| u8::try_from(b).ok()))
        .collect()
}
