// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prints the live transcript and the end-of-run summary.
//!
//! The main structure in this module is [`DisplayReporter`].

use super::formatters::{
    DisplayStepTitle, STEP_LABEL_WIDTH, write_failures, write_metrics, write_summary,
    write_warnings,
};
use crate::{
    errors::WriteEventError,
    helpers::StepTitle,
    indenter::IndentLevel,
    node::{Node, NodeKind, decorated_title},
    reporter::{
        aggregator::RunReport,
        events::ReporterEvent,
        helpers::{Styles, Theme, ThemeCharacters},
        imp::ReporterOutput,
    },
};
use owo_colors::OwoColorize;
use std::{
    fmt,
    io::{self, BufWriter, IsTerminal, Write},
};
use tracing::{debug, warn};

/// Erases the current terminal line and moves the cursor to its start.
const TERMINAL_LINE_RESET: &str = "\x1b[2K\x1b[0G";

/// Moves the cursor to the start of the line on outputs that aren't terminals.
const PLAIN_LINE_RESET: &str = "\r";

#[derive(Debug, Default)]
pub(crate) struct DisplayReporterBuilder {
    pub(crate) theme: Theme,
    pub(crate) should_colorize: bool,
}

impl DisplayReporterBuilder {
    pub(crate) fn build(self, output: ReporterOutput<'_>) -> DisplayReporter<'_> {
        let mut theme_characters = ThemeCharacters::default();
        let line_reset = match &output {
            ReporterOutput::Terminal => {
                if supports_unicode::on(supports_unicode::Stream::Stdout) {
                    theme_characters.use_unicode();
                }
                if io::stdout().is_terminal() {
                    TERMINAL_LINE_RESET
                } else {
                    PLAIN_LINE_RESET
                }
            }
            ReporterOutput::Buffer { .. } => {
                // Always use Unicode for internal buffers.
                theme_characters.use_unicode();
                PLAIN_LINE_RESET
            }
        };

        DisplayReporter {
            output,
            inner: DisplayReporterImpl {
                theme: self.theme,
                should_colorize: self.should_colorize,
                styles: Box::default(),
                theme_characters,
                line_reset,
                level: IndentLevel::default(),
                open_step_line: None,
            },
        }
    }
}

/// Functionality to write the transcript to stdout and stderr.
pub(crate) struct DisplayReporter<'a> {
    output: ReporterOutput<'a>,
    inner: DisplayReporterImpl,
}

impl DisplayReporter<'_> {
    pub(crate) fn write_event(
        &mut self,
        event: ReporterEvent<'_>,
        report: &RunReport,
    ) -> Result<(), WriteEventError> {
        match &mut self.output {
            ReporterOutput::Terminal => {
                let mut stdout = BufWriter::new(io::stdout());
                let mut stderr = BufWriter::new(io::stderr());
                self.inner
                    .write_event_impl(event, report, &mut stdout, &mut stderr)
                    .map_err(WriteEventError::Io)?;
                // Flushed per event, so an open step line shows up before it
                // completes.
                stdout.flush().map_err(WriteEventError::Io)?;
                stderr.flush().map_err(WriteEventError::Io)
            }
            ReporterOutput::Buffer { stdout, stderr } => self
                .inner
                .write_event_impl(event, report, *stdout, *stderr)
                .map_err(WriteEventError::Io),
        }
    }
}

/// A step line written without its trailing newline.
///
/// Completing the line returns the cursor to the start of the line first, so
/// the final rendering replaces the in-progress one.
#[derive(Debug)]
#[must_use]
pub(crate) struct StepLine {
    reset: &'static str,
}

impl StepLine {
    fn complete(self, writer: &mut dyn Write, line: impl fmt::Display) -> io::Result<()> {
        writeln!(writer, "{}{line}", self.reset)
    }
}

struct DisplayReporterImpl {
    theme: Theme,
    should_colorize: bool,
    styles: Box<Styles>,
    theme_characters: ThemeCharacters,
    line_reset: &'static str,
    level: IndentLevel,
    open_step_line: Option<StepLine>,
}

impl DisplayReporterImpl {
    fn write_event_impl(
        &mut self,
        event: ReporterEvent<'_>,
        report: &RunReport,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> io::Result<()> {
        match event {
            ReporterEvent::RunStarted => {
                // Styles are fixed for the whole run.
                self.styles = Box::new(Styles::new(self.theme, self.should_colorize));
                self.level = IndentLevel::default();
                self.open_step_line = None;
                writeln!(out)?;
            }
            ReporterEvent::FeatureStarted { feature } => {
                self.level.enter();
                self.write_feature_heading(feature, out)?;
            }
            ReporterEvent::ScenarioStarted { scenario } => {
                self.level.enter();
                let style = if scenario.pending {
                    self.styles.scenario_pending
                } else {
                    self.styles.scenario
                };
                let title = decorated_title(scenario).style(style).to_string();
                writeln!(out, "{}", self.level.indent(&title))?;
            }
            ReporterEvent::VariantStarted { variant } => {
                self.level.enter();
                // Dummy variants only exist to hold the steps of scenarios
                // without explicit variants.
                if !variant.kind.is_dummy() {
                    let style = if variant.pending {
                        self.styles.variant_pending
                    } else {
                        self.styles.variant
                    };
                    let title = decorated_title(variant).style(style).to_string();
                    writeln!(out, "{}", self.level.indent(&title))?;
                }
            }
            ReporterEvent::FeatureFinished { feature } => {
                self.exit_level(feature);
                if feature.child_suites == 0 || feature.ends_with_empty_suite {
                    writeln!(out)?;
                }
            }
            ReporterEvent::ScenarioFinished { scenario: node }
            | ReporterEvent::VariantFinished { variant: node } => {
                self.exit_level(node);
                writeln!(out)?;
            }
            ReporterEvent::StepPending { step } => {
                self.write_pending_step(step, out)?;
            }
            ReporterEvent::StepStarted { step } => {
                if self.open_step_line.take().is_some() {
                    debug!("step `{}` started before the previous step completed", step.title);
                    writeln!(out)?;
                }
                let line = self.begin_step_line(step, out)?;
                self.open_step_line = Some(line);
            }
            ReporterEvent::StepPassed { step, duration } => {
                let styles = &self.styles;
                let line = format!(
                    "{}{}{}",
                    format!("  {} ", self.theme_characters.ok).style(styles.symbol),
                    DisplayStepTitle {
                        title: StepTitle::split(&step.title),
                        label_width: STEP_LABEL_WIDTH,
                        label_style: styles.step_label,
                        text_style: styles.step_text,
                    },
                    format!(" ({}ms)", duration.as_millis()).style(styles.duration),
                );
                let line = self.level.indent(&line);
                self.take_step_line(step).complete(out, line)?;
            }
            ReporterEvent::StepFailed { step, .. } => {
                let styles = &self.styles;
                let line = format!(
                    "{}{}",
                    self.failure_symbol(report.failures.len()),
                    DisplayStepTitle {
                        title: StepTitle::split(&step.title),
                        label_width: 0,
                        label_style: styles.step_label_failed,
                        text_style: styles.step_text_failed,
                    },
                );
                let line = self.level.indent(&line);
                self.take_step_line(step).complete(out, line)?;
            }
            ReporterEvent::HookFailed { hook, .. } => {
                let label = match &hook.kind {
                    NodeKind::Hook { subtype } => format!("{subtype} hook"),
                    _ => hook.title.clone(),
                };
                let line = format!(
                    "{}{}",
                    self.failure_symbol(report.failures.len()),
                    label.style(self.styles.hook_failed),
                );
                let line = self.level.indent(&line);
                // Hooks fail outside of steps, unless the failure interrupted
                // a running step.
                match self.open_step_line.take() {
                    Some(step_line) => step_line.complete(out, line)?,
                    None => writeln!(out, "{line}")?,
                }
            }
            ReporterEvent::RunFinished => {
                if self.open_step_line.take().is_some() {
                    writeln!(out)?;
                }
                if self.level.depth() != 0 {
                    warn!("run finished at nesting depth {}", self.level.depth());
                }

                write_summary(out, &report.stats, &self.styles)?;
                write_metrics(out, &report.stats, &report.coverage)?;
                // Everything on stdout must be visible before the stderr
                // appendix starts.
                out.flush()?;

                if !report.failures.is_empty() {
                    write_failures(err, &report.failures, &self.styles)?;
                }
                write_warnings(err, &report.warnings, &self.styles)?;
                writeln!(err)?;
            }
        }

        Ok(())
    }

    fn write_feature_heading(&self, feature: &Node, out: &mut dyn Write) -> io::Result<()> {
        let (title_style, subtitle_style) = if feature.pending {
            (
                self.styles.feature_title_pending,
                self.styles.feature_subtitle_pending,
            )
        } else {
            (self.styles.feature_title, self.styles.feature_subtitle)
        };

        let title = format!("{}\n", decorated_title(feature).style(title_style));
        writeln!(out, "{}", self.level.indent(&title))?;
        for line in &feature.subtitle {
            let line = format!("\t{}", line.style(subtitle_style));
            writeln!(out, "{}", self.level.indent(&line))?;
        }
        if !feature.subtitle.is_empty() {
            writeln!(out)?;
        }
        if feature.child_suites > 0 {
            writeln!(out)?;
        }
        Ok(())
    }

    fn write_pending_step(&self, step: &Node, out: &mut dyn Write) -> io::Result<()> {
        let mut title = step.title.clone();
        if step.manual {
            title.push_str(" [Manual]");
        }

        let line = format!(
            "{}{}",
            format!("  {} ", self.theme_characters.pending).style(self.styles.symbol_pending),
            DisplayStepTitle {
                title: StepTitle::split(&title),
                label_width: STEP_LABEL_WIDTH,
                label_style: self.styles.step_label_pending,
                text_style: self.styles.step_text_pending,
            },
        );
        writeln!(out, "{}", self.level.indent(&line))
    }

    /// Writes the in-progress rendering of a step, without a newline.
    fn begin_step_line(&self, step: &Node, out: &mut dyn Write) -> io::Result<StepLine> {
        let line = format!(
            "{}{}",
            format!("  {} ", self.theme_characters.running).style(self.styles.symbol),
            DisplayStepTitle {
                title: StepTitle::split(&step.title),
                label_width: STEP_LABEL_WIDTH,
                label_style: self.styles.step_label,
                text_style: self.styles.step_text,
            },
        );
        write!(out, "{}", self.level.indent(&line))?;
        Ok(StepLine {
            reset: self.line_reset,
        })
    }

    fn take_step_line(&mut self, step: &Node) -> StepLine {
        self.open_step_line.take().unwrap_or_else(|| {
            debug!("step `{}` completed without a step start", step.title);
            StepLine {
                reset: self.line_reset,
            }
        })
    }

    fn failure_symbol(&self, ordinal: usize) -> String {
        format!("  {} {ordinal}) ", self.theme_characters.err)
            .style(self.styles.symbol_failed)
            .to_string()
    }

    fn exit_level(&mut self, node: &Node) {
        if !self.level.exit() {
            warn!(
                "{} end for `{}` at nesting depth 0, ignoring",
                node.kind.name(),
                node.title,
            );
        }
    }
}
