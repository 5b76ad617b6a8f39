// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Replays recorded Gherkin-style test runs as a hierarchical console report.
//!
//! The reporter itself lives in [`gherkin_reporter`]; this crate is the
//! command-line front end that feeds it a recorded event log.

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
#[doc(hidden)]
pub use output::{OutputContext, OutputWriter};
