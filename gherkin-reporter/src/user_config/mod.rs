// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-specific configuration for gherkin-report.
//!
//! The user config holds display preferences: the color theme and whether to
//! colorize output at all.
//!
//! ## Config file location
//!
//! `$XDG_CONFIG_HOME/gherkin-report/config.toml`, or
//! `~/.config/gherkin-report/config.toml` if `XDG_CONFIG_HOME` is unset.
//!
//! ## Configuration hierarchy
//!
//! Settings are resolved in the following order (highest priority first):
//!
//! 1. CLI arguments (e.g. `--theme clear`)
//! 2. Environment variables (e.g. `GHERKIN_REPORT_THEME=clear`)
//! 3. The user config file (`[ui]` section)
//! 4. Built-in defaults
//!
//! The first two are applied by the command-line front end.

mod discovery;
mod imp;

pub use discovery::*;
pub use imp::*;
