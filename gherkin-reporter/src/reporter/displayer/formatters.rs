// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::inspect::DisplayCaptured;
use crate::{
    helpers::{StepTitle, pad},
    indenter::indent,
    reporter::{
        aggregator::{CoverageMap, LevelStats, RunStats, VariantWarning, WarningLists},
        failure::FailureRecord,
        helpers::Styles,
    },
};
use owo_colors::{OwoColorize, Style};
use std::{
    fmt,
    io::{self, Write},
};

/// Width of step labels in pending, running and passed step lines.
pub(super) const STEP_LABEL_WIDTH: usize = 5;

const ROW_NAME_WIDTH: usize = 9;
const COUNT_WIDTH: usize = 6;
const HEADER_LEAD_WIDTH: usize = 12;
const SEPARATOR_WIDTH: usize = 47;

/// A step title split into a padded label and its text.
pub(super) struct DisplayStepTitle<'a> {
    pub(super) title: StepTitle<'a>,
    pub(super) label_width: usize,
    pub(super) label_style: Style,
    pub(super) text_style: Style,
}

impl fmt::Display for DisplayStepTitle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = pad(self.title.label, self.label_width, ' ');
        match self.title.text {
            Some(text) => write!(
                f,
                "{}{}",
                format!("{label}: ").style(self.label_style),
                text.style(self.text_style),
            ),
            // No separator: the whole title is the label.
            None => write!(f, "{}", label.style(self.label_style)),
        }
    }
}

pub(super) fn write_summary(
    writer: &mut dyn Write,
    stats: &RunStats,
    styles: &Styles,
) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(
        writer,
        "{}| {} | {} |  TOTAL | {} |",
        pad("", HEADER_LEAD_WIDTH, ' '),
        "passed".style(styles.symbol),
        "failed".style(styles.symbol_failed),
        "manual".style(styles.symbol_manual),
    )?;
    writeln!(writer, "  {}", pad("", SEPARATOR_WIDTH, '-'))?;
    for (level, counts) in stats.levels() {
        let LevelStats {
            passed,
            failed,
            manual,
        } = *counts;
        writeln!(
            writer,
            "  {} | {} | {} | {} | {} | ",
            pad(level.name(), ROW_NAME_WIDTH, ' '),
            pad(passed, COUNT_WIDTH, ' ').style(styles.symbol),
            pad(failed, COUNT_WIDTH, ' ').style(styles.symbol_failed),
            pad(counts.total(), COUNT_WIDTH, ' '),
            pad(manual, COUNT_WIDTH, ' ').style(styles.symbol_manual),
        )?;
    }
    writeln!(writer)
}

pub(super) fn write_metrics(
    writer: &mut dyn Write,
    stats: &RunStats,
    coverage: &CoverageMap,
) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "  METRICS:")?;
    writeln!(
        writer,
        "   · Product size (Σ features): {}{}",
        stats.features.total(),
        ManualSuffix(stats.features.manual),
    )?;
    writeln!(
        writer,
        "   · Test-set size (Σ test-variants): {}{}",
        stats.variants.total(),
        ManualSuffix(stats.variants.manual),
    )?;

    write!(writer, "   · Coverage (Σ test-variants/feature): [")?;
    for (index, feature) in coverage.values().enumerate() {
        if index > 0 {
            write!(writer, ", ")?;
        }
        write!(writer, "{}{}", feature.total, ManualSuffix(feature.manual))?;
    }
    writeln!(writer, "]")?;
    writeln!(writer)
}

/// Displays ` (N manual)`, or nothing if N is zero.
struct ManualSuffix(usize);

impl fmt::Display for ManualSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => Ok(()),
            n => write!(f, " ({n} manual)"),
        }
    }
}

pub(super) fn write_failures(
    writer: &mut dyn Write,
    failures: &[FailureRecord],
    styles: &Styles,
) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "  FAILURES:")?;
    writeln!(writer)?;
    for failure in failures {
        write_failure(writer, failure, styles)?;
    }
    Ok(())
}

fn write_failure(
    writer: &mut dyn Write,
    failure: &FailureRecord,
    styles: &Styles,
) -> io::Result<()> {
    let error = &failure.error;

    writeln!(
        writer,
        "{}",
        format!("{}) {}", failure.ordinal, failure.full_title).style(styles.failure_text),
    )?;
    writeln!(writer)?;

    let message = format!("{}: {}", error.display_name(), error.message);
    writeln!(writer, "{}", indent(&message, 1, false).style(styles.failure_message))?;

    if error.is_assertion() {
        let expected = DisplayCaptured::new(&error.expected, styles.failure_expected_value, styles);
        write_value_block(writer, "Expected:".style(styles.failure_expected), expected)?;
        let actual = DisplayCaptured::new(&error.actual, styles.failure_actual_value, styles);
        write_value_block(writer, "Actual:".style(styles.failure_actual), actual)?;
    }

    let stack = indent(error.stack_without_message(), 2, true);
    writeln!(writer, "\n{}\n\n", stack.style(styles.failure_stack))
}

fn write_value_block(
    writer: &mut dyn Write,
    heading: impl fmt::Display,
    value: impl fmt::Display,
) -> io::Result<()> {
    writeln!(
        writer,
        "\n{}\n\n{}",
        indent(&heading.to_string(), 2, false),
        indent(&value.to_string(), 3, false),
    )
}

pub(super) fn write_warnings(
    writer: &mut dyn Write,
    warnings: &WarningLists,
    styles: &Styles,
) -> io::Result<()> {
    for warning in [VariantWarning::BuggyButPassed, VariantWarning::NonBuggyButFailed] {
        let titles = warnings.list(warning);
        if titles.is_empty() {
            continue;
        }

        let heading = warning.heading();
        writeln!(writer)?;
        writeln!(writer, "{}", heading.style(styles.failure_message))?;
        writeln!(
            writer,
            "{}",
            "=".repeat(heading.chars().count()).style(styles.failure_message),
        )?;
        for title in titles {
            writeln!(writer, "{}", format!(" - {title}").style(styles.failure_text))?;
        }
        writeln!(writer)?;
    }
    Ok(())
}
