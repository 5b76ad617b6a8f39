// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregates run events and prints them out.
//!
//! The main structure in this module is [`Reporter`].

use super::{
    aggregator::{EventAggregator, RunReport},
    displayer::{DisplayReporter, DisplayReporterBuilder},
    events::ReporterEvent,
    helpers::Theme,
};
use crate::errors::WriteEventError;

/// Output destination for the reporter.
///
/// This is usually the terminal, but can be a pair of in-memory buffers for
/// tests.
pub enum ReporterOutput<'a> {
    /// Write the transcript to stdout and the failure appendix to stderr.
    Terminal,

    /// Write output to buffers.
    Buffer {
        /// Receives what would go to stdout.
        stdout: &'a mut Vec<u8>,

        /// Receives what would go to stderr.
        stderr: &'a mut Vec<u8>,
    },
}

/// Reporter builder.
#[derive(Debug, Default)]
pub struct ReporterBuilder {
    should_colorize: bool,
    theme: Theme,
}

impl ReporterBuilder {
    /// Set to true if the reporter should colorize output.
    pub fn set_colorize(&mut self, should_colorize: bool) -> &mut Self {
        self.should_colorize = should_colorize;
        self
    }

    /// Sets the color theme.
    ///
    /// The theme takes effect when the next run starts.
    pub fn set_theme(&mut self, theme: Theme) -> &mut Self {
        self.theme = theme;
        self
    }
}

impl ReporterBuilder {
    /// Creates a new reporter.
    pub fn build<'a>(&self, output: ReporterOutput<'a>) -> Reporter<'a> {
        let display_reporter = DisplayReporterBuilder {
            theme: self.theme,
            should_colorize: self.should_colorize,
        }
        .build(output);

        Reporter {
            display_reporter,
            aggregator: EventAggregator::new(),
        }
    }
}

/// Functionality to report a run: a live transcript on stdout, and a summary,
/// metrics, failures and warnings at the end.
pub struct Reporter<'a> {
    /// Used to display the transcript.
    display_reporter: DisplayReporter<'a>,
    /// Used to count outcomes and collect failures.
    aggregator: EventAggregator,
}

impl Reporter<'_> {
    /// Report an event.
    ///
    /// Events must arrive in run order: a node's start event before the events
    /// of its descendants, and those before its own end event.
    pub fn report_event(&mut self, event: ReporterEvent<'_>) -> Result<(), WriteEventError> {
        // The aggregator goes first, so the displayer sees failure ordinals
        // and final counts that include this event.
        self.aggregator.write_event(event);
        self.display_reporter
            .write_event(event, self.aggregator.report())
    }

    /// Returns what has been aggregated so far.
    ///
    /// After [`ReporterEvent::RunFinished`], this is the final report of the run.
    pub fn report(&self) -> &RunReport {
        self.aggregator.report()
    }
}
