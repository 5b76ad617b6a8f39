// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Nodes of the implicit test tree.
//!
//! Nodes are owned by the test engine and handed to the reporter as event
//! payloads. The reporter never stores the tree: it only reads a node and, when
//! it needs context, walks the node's parent chain up to the root.

use std::{fmt, iter, sync::Arc};

/// Separator between segments of a [`full_title`].
pub const TITLE_SEPARATOR: &str = " --> ";

/// The kind of a [`Node`], along with kind-specific data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// A feature: the top-level grouping of scenarios.
    Feature,

    /// A scenario within a feature.
    Scenario,

    /// One concrete parameterization of a scenario.
    Variant {
        /// True if this is the placeholder variant of a scenario that declares
        /// no explicit variants.
        dummy: bool,
    },

    /// A step within a variant.
    Step,

    /// A setup or teardown hook.
    Hook {
        /// The kind of hook, for example `"before each"`.
        subtype: String,
    },
}

impl NodeKind {
    /// Returns true for dummy variants.
    pub fn is_dummy(&self) -> bool {
        matches!(self, NodeKind::Variant { dummy: true })
    }

    /// Returns the name used for this kind in event logs.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Feature => "feature",
            NodeKind::Scenario => "scenario",
            NodeKind::Variant { .. } => "variant",
            NodeKind::Step => "step",
            NodeKind::Hook { .. } => "hook",
        }
    }
}

/// A node in the test tree, as seen by the reporter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    /// The kind of node.
    pub kind: NodeKind,

    /// The node's own title.
    ///
    /// Step titles have the form `"<label>: <text>"`, e.g. `"Given: a user"`.
    pub title: String,

    /// True if the node is pending (declared but not implemented).
    pub pending: bool,

    /// True if the node is flagged as manual (not automatable).
    pub manual: bool,

    /// Identifier of a known defect this node is tagged with.
    pub bug_id: Option<String>,

    /// Narrative lines printed below a feature's title.
    pub subtitle: Vec<String>,

    /// The number of child suites declared by this node.
    pub child_suites: usize,

    /// True if the last declared child suite has no children of its own.
    pub ends_with_empty_suite: bool,

    /// The enclosing node, or `None` for the root sentinel.
    pub parent: Option<Arc<Node>>,
}

impl Node {
    /// Creates a new node of the given kind with default metadata and no parent.
    pub fn new(kind: NodeKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            pending: false,
            manual: false,
            bug_id: None,
            subtitle: Vec::new(),
            child_suites: 0,
            ends_with_empty_suite: false,
            parent: None,
        }
    }

    /// Creates a feature node.
    pub fn feature(title: impl Into<String>) -> Self {
        Self::new(NodeKind::Feature, title)
    }

    /// Creates a scenario node.
    pub fn scenario(title: impl Into<String>) -> Self {
        Self::new(NodeKind::Scenario, title)
    }

    /// Creates an explicit variant node.
    pub fn variant(title: impl Into<String>) -> Self {
        Self::new(NodeKind::Variant { dummy: false }, title)
    }

    /// Creates the dummy variant of a scenario without explicit variants.
    pub fn dummy_variant() -> Self {
        Self::new(NodeKind::Variant { dummy: true }, "")
    }

    /// Creates a step node.
    pub fn step(title: impl Into<String>) -> Self {
        Self::new(NodeKind::Step, title)
    }

    /// Creates a hook node with the given subtype, e.g. `"before each"`.
    pub fn hook(subtype: impl Into<String>) -> Self {
        let subtype = subtype.into();
        let title = format!("\"{subtype}\" hook");
        Self::new(NodeKind::Hook { subtype }, title)
    }

    /// Sets the parent of this node.
    pub fn with_parent(mut self, parent: Arc<Node>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Marks this node as pending.
    pub fn with_pending(mut self, pending: bool) -> Self {
        self.pending = pending;
        self
    }

    /// Marks this node as manual.
    pub fn with_manual(mut self, manual: bool) -> Self {
        self.manual = manual;
        self
    }

    /// Tags this node with a known-defect identifier.
    pub fn with_bug_id(mut self, bug_id: impl Into<String>) -> Self {
        self.bug_id = Some(bug_id.into());
        self
    }

    /// Sets the feature narrative lines.
    pub fn with_subtitle<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subtitle = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the declared child suite shape.
    pub fn with_child_suites(mut self, child_suites: usize, ends_with_empty_suite: bool) -> Self {
        self.child_suites = child_suites;
        self.ends_with_empty_suite = ends_with_empty_suite;
        self
    }

    /// Returns this node and its ancestors, innermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = &Node> {
        iter::successors(Some(self), |node| node.parent.as_deref())
    }

    /// Returns the closest enclosing feature, including this node itself.
    pub fn owning_feature(&self) -> Option<&Node> {
        self.ancestors()
            .find(|node| matches!(node.kind, NodeKind::Feature))
    }

    /// Returns a display adapter for the fully-qualified title of this node.
    pub fn display_full_title(&self) -> DisplayFullTitle<'_> {
        DisplayFullTitle(self)
    }
}

/// Returns the fully-qualified display title of a node.
///
/// Titles are collected from the node up to the root and joined outermost-first
/// with [`TITLE_SEPARATOR`]. Dummy variants contribute nothing, and hooks
/// contribute `"<subtype> hook"` instead of their own title.
pub fn full_title(node: &Node) -> String {
    node.display_full_title().to_string()
}

/// Returns the title used for headings: the node's title, followed by
/// `[Manual]` and `[Bug Id: ...]` markers when applicable.
pub fn decorated_title(node: &Node) -> String {
    let mut title = node.title.clone();
    if node.manual {
        title.push_str(" [Manual]");
    }
    if let Some(bug_id) = &node.bug_id {
        title.push_str(" [Bug Id: ");
        title.push_str(bug_id);
        title.push(']');
    }
    title
}

/// Display adapter returned by [`Node::display_full_title`].
#[derive(Clone, Copy, Debug)]
pub struct DisplayFullTitle<'a>(&'a Node);

impl fmt::Display for DisplayFullTitle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut segments: Vec<TitleSegment<'_>> = self
            .0
            .ancestors()
            .filter_map(|node| match &node.kind {
                NodeKind::Variant { dummy: true } => None,
                NodeKind::Hook { subtype } => Some(TitleSegment::Hook(subtype)),
                _ => Some(TitleSegment::Title(&node.title)),
            })
            .collect();
        segments.reverse();

        for (index, segment) in segments.iter().enumerate() {
            if index > 0 {
                f.write_str(TITLE_SEPARATOR)?;
            }
            match segment {
                TitleSegment::Title(title) => f.write_str(title)?,
                TitleSegment::Hook(subtype) => write!(f, "{subtype} hook")?,
            }
        }
        Ok(())
    }
}

enum TitleSegment<'a> {
    Title(&'a str),
    Hook(&'a str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn login_scenario() -> Arc<Node> {
        let feature = Arc::new(Node::feature("Login"));
        Arc::new(Node::scenario("Bad password").with_parent(feature))
    }

    #[test]
    fn full_title_skips_dummy_variants() {
        let variant = Arc::new(Node::dummy_variant().with_parent(login_scenario()));
        let step = Node::step("Then: access is denied").with_parent(variant);

        assert_eq!(
            full_title(&step),
            "Login --> Bad password --> Then: access is denied"
        );
    }

    #[test]
    fn full_title_keeps_explicit_variants() {
        let variant = Arc::new(Node::variant("wrong case").with_parent(login_scenario()));
        let step = Node::step("When: the user logs in").with_parent(variant);

        assert_eq!(
            full_title(&step),
            "Login --> Bad password --> wrong case --> When: the user logs in"
        );
    }

    #[test]
    fn full_title_uses_hook_subtype() {
        let variant = Arc::new(Node::dummy_variant().with_parent(login_scenario()));
        let hook = Node::hook("before each").with_parent(variant);

        assert_eq!(full_title(&hook), "Login --> Bad password --> before each hook");
    }

    #[test]
    fn full_title_is_idempotent() {
        let step = Node::step("Given: x").with_parent(login_scenario());
        let first = full_title(&step);
        assert_eq!(first, full_title(&step));
        assert_eq!(first, step.display_full_title().to_string());
    }

    #[test]
    fn full_title_of_a_root_level_hook() {
        let hook = Node::hook("after all");
        assert_eq!(full_title(&hook), "after all hook");
    }

    #[test_case(Node::feature("Login"), "Login" ; "plain")]
    #[test_case(Node::scenario("S").with_manual(true), "S [Manual]" ; "manual")]
    #[test_case(Node::variant("V").with_bug_id("BUG-7"), "V [Bug Id: BUG-7]" ; "bug")]
    #[test_case(
        Node::variant("V").with_manual(true).with_bug_id("BUG-7"),
        "V [Manual] [Bug Id: BUG-7]" ;
        "manual and bug"
    )]
    fn decorated_titles(node: Node, expected: &str) {
        assert_eq!(decorated_title(&node), expected);
    }

    #[test]
    fn owning_feature_walks_parents() {
        let variant = Node::variant("V").with_parent(login_scenario());
        assert_eq!(
            variant.owning_feature().map(|f| f.title.as_str()),
            Some("Login")
        );
        assert!(Node::scenario("orphan").owning_feature().is_none());
    }
}
