// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    ExpectedError, ReportExitCode, Result,
    output::{OutputContext, OutputOpts, OutputWriter},
};
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use gherkin_reporter::{
    replay::replay,
    reporter::{ReporterBuilder, Theme},
    user_config::{UserConfig, UserConfigLocation},
};
use std::{
    fs::File,
    io::{self, BufReader},
};
use tracing::{debug, info};

/// Replays recorded Gherkin-style test runs as a hierarchical console report.
#[derive(Debug, Parser)]
#[command(
    version,
    styles = crate::output::clap_styles::style(),
    max_term_width = 100,
)]
pub struct GherkinReportApp {
    #[clap(flatten)]
    output: OutputOpts,

    /// User config file [default: $XDG_CONFIG_HOME/gherkin-report/config.toml]
    ///
    /// Use `none` to ignore any user config and use the built-in defaults.
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        env = "GHERKIN_REPORT_CONFIG"
    )]
    user_config_file: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

impl GherkinReportApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app.
    ///
    /// Returns the exit code.
    pub fn exec(self, output: OutputContext, output_writer: &mut OutputWriter) -> Result<i32> {
        let location = UserConfigLocation::from_cli_or_env(self.user_config_file.as_deref());
        let user_config = UserConfig::load(location)?;

        match self.command {
            Command::Replay(opts) => opts.exec(output, &user_config, output_writer),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay a recorded event log
    ///
    /// The log has one JSON event per line. The transcript and summary are
    /// written to stdout, and failure details and bug-tag warnings to stderr.
    Replay(ReplayOpts),
}

#[derive(Debug, Args)]
struct ReplayOpts {
    /// Event log to replay, or `-` for standard input
    #[arg(value_name = "LOG", default_value = "-")]
    log: Utf8PathBuf,

    /// Color theme: dark, clear [default: from user config]
    #[arg(long, value_name = "THEME", env = "GHERKIN_REPORT_THEME")]
    theme: Option<String>,
}

impl ReplayOpts {
    fn exec(
        self,
        output: OutputContext,
        user_config: &UserConfig,
        output_writer: &mut OutputWriter,
    ) -> Result<i32> {
        let theme = match &self.theme {
            Some(name) => Theme::from_name(name),
            None => user_config.ui.theme,
        };
        let color = output.report_color(user_config.ui.color);
        debug!("replaying {} with theme {theme} and color {color:?}", self.log);

        let mut builder = ReporterBuilder::default();
        builder
            .set_theme(theme)
            .set_colorize(color.should_colorize(supports_color::Stream::Stdout));
        let mut reporter = builder.build(output_writer.reporter_output());

        let result = if self.log.as_str() == "-" {
            replay(io::stdin().lock(), &mut reporter)
        } else {
            let file = File::open(&self.log).map_err(|err| ExpectedError::EventLogOpenError {
                path: self.log.clone(),
                err,
            })?;
            replay(BufReader::new(file), &mut reporter)
        };
        let count = result.map_err(|err| ExpectedError::EventLogError {
            path: self.log.clone(),
            err,
        })?;
        if output.verbose {
            info!("replayed {count} events from {}", self.log);
        }

        if reporter.report().failures.is_empty() {
            Ok(ReportExitCode::OK)
        } else {
            Ok(ReportExitCode::RUN_FAILED)
        }
    }
}
