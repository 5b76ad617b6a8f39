// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests: recorded event logs replayed through the reporter.

mod fixtures;
mod replay;
mod transcript;
