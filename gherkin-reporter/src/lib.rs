// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core functionality for [gherkin-report](https://crates.io/crates/gherkin-report).
//!
//! A test engine describes a run as a flat, strictly ordered stream of
//! [`ReporterEvent`](reporter::ReporterEvent)s over an implicit tree of
//! features, scenarios, variants and steps. The [`Reporter`](reporter::Reporter)
//! turns that stream into a live hierarchical transcript, per-level statistics,
//! coverage metrics, a failure appendix and bug-tag warnings.

pub mod errors;
mod helpers;
mod indenter;
pub mod node;
pub mod replay;
pub mod reporter;
pub mod user_config;
