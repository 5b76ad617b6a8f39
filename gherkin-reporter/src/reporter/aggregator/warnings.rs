// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cross-checks of bug tags against observed variant outcomes.

use super::NodeOutcome;

/// A warning raised for a completed variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum VariantWarning {
    /// The variant is tagged with a bug id, but it passed.
    BuggyButPassed,

    /// The variant is not tagged with a bug id, but it failed.
    NonBuggyButFailed,
}

impl VariantWarning {
    /// The heading printed above the list of variants with this warning.
    pub fn heading(self) -> &'static str {
        match self {
            VariantWarning::BuggyButPassed => {
                "*** WARNING: The following variants are marked as bugs but they are passing ***"
            }
            VariantWarning::NonBuggyButFailed => {
                "*** WARNING: The following variants are failing but they are not marked as bugs ***"
            }
        }
    }
}

/// Classifies a completed variant.
///
/// Manual and pending outcomes never produce a warning.
pub fn classify(has_bug_id: bool, outcome: NodeOutcome) -> Option<VariantWarning> {
    match (has_bug_id, outcome) {
        (true, NodeOutcome::Passed) => Some(VariantWarning::BuggyButPassed),
        (false, NodeOutcome::Failed) => Some(VariantWarning::NonBuggyButFailed),
        _ => None,
    }
}

/// Full titles of variants that raised warnings, in observation order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WarningLists {
    /// Bug-tagged variants that passed.
    pub buggy_but_passed: Vec<String>,

    /// Untagged variants that failed.
    pub non_buggy_but_failed: Vec<String>,
}

impl WarningLists {
    /// Returns true if no warnings were raised.
    pub fn is_empty(&self) -> bool {
        self.buggy_but_passed.is_empty() && self.non_buggy_but_failed.is_empty()
    }

    /// Returns the list for `warning`.
    pub fn list(&self, warning: VariantWarning) -> &[String] {
        match warning {
            VariantWarning::BuggyButPassed => &self.buggy_but_passed,
            VariantWarning::NonBuggyButFailed => &self.non_buggy_but_failed,
        }
    }

    pub(super) fn push(&mut self, warning: VariantWarning, full_title: String) {
        match warning {
            VariantWarning::BuggyButPassed => self.buggy_but_passed.push(full_title),
            VariantWarning::NonBuggyButFailed => self.non_buggy_but_failed.push(full_title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;
    use test_strategy::proptest;

    #[test_case(true, NodeOutcome::Passed, Some(VariantWarning::BuggyButPassed) ; "buggy passed")]
    #[test_case(true, NodeOutcome::Failed, None ; "buggy failed")]
    #[test_case(true, NodeOutcome::Manual, None ; "buggy manual")]
    #[test_case(true, NodeOutcome::Pending, None ; "buggy pending")]
    #[test_case(false, NodeOutcome::Failed, Some(VariantWarning::NonBuggyButFailed) ; "untagged failed")]
    #[test_case(false, NodeOutcome::Passed, None ; "untagged passed")]
    #[test_case(false, NodeOutcome::Pending, None ; "untagged pending")]
    fn classification_table(
        has_bug_id: bool,
        outcome: NodeOutcome,
        expected: Option<VariantWarning>,
    ) {
        assert_eq!(classify(has_bug_id, outcome), expected);
    }

    #[proptest]
    fn warnings_match_tag_and_outcome(has_bug_id: bool, outcome: NodeOutcome) {
        match classify(has_bug_id, outcome) {
            Some(VariantWarning::BuggyButPassed) => {
                assert!(has_bug_id);
                assert_eq!(outcome, NodeOutcome::Passed);
            }
            Some(VariantWarning::NonBuggyButFailed) => {
                assert!(!has_bug_id);
                assert_eq!(outcome, NodeOutcome::Failed);
            }
            None => {
                assert!(!(has_bug_id && outcome == NodeOutcome::Passed));
                assert!(!(!has_bug_id && outcome == NodeOutcome::Failed));
            }
        }
    }

    #[test]
    fn lists_are_disjoint_and_ordered() {
        let mut lists = WarningLists::default();
        assert!(lists.is_empty());
        lists.push(VariantWarning::NonBuggyButFailed, "A --> one".to_owned());
        lists.push(VariantWarning::BuggyButPassed, "A --> two".to_owned());
        lists.push(VariantWarning::NonBuggyButFailed, "B --> three".to_owned());
        assert!(!lists.is_empty());
        assert_eq!(lists.list(VariantWarning::BuggyButPassed), ["A --> two"]);
        assert_eq!(
            lists.list(VariantWarning::NonBuggyButFailed),
            ["A --> one", "B --> three"]
        );
    }

    #[test]
    fn heading_widths() {
        assert_eq!(VariantWarning::BuggyButPassed.heading().chars().count(), 79);
        assert_eq!(VariantWarning::NonBuggyButFailed.heading().chars().count(), 83);
    }
}
