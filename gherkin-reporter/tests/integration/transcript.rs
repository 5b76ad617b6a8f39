// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::{CATALOG_LOG, LOGIN_LOG, replay_plain, replay_with};
use gherkin_reporter::reporter::{FeatureCoverage, LevelStats, ReporterBuilder, Theme};
use pretty_assertions::assert_eq;

#[test]
fn login_transcript() {
    let transcript = replay_plain(LOGIN_LOG);
    assert_eq!(transcript.result.expect("log is valid"), 20);

    let expected_stdout = [
        "",
        "Login",
        "",
        "",
        "  Valid password",
        "      ◦ Given: a user\r      ✓ Given: a user (4ms)",
        "",
        "",
        "  Bad password",
        "    empty [Bug Id: BUG-3]",
        "      ◦  Then: it is rejected\r      ✗ 1) Then: it is rejected",
        "",
        "    too long [Bug Id: BUG-9]",
        "      ◦  Then: it is rejected\r      ✓  Then: it is rejected (2ms)",
        "",
        "",
        "",
        "            | passed | failed |  TOTAL | manual |",
        "  -----------------------------------------------",
        "   Features |      0 |      1 |      1 |      0 | ",
        "  Scenarios |      1 |      1 |      2 |      0 | ",
        "   Variants |      2 |      1 |      3 |      0 | ",
        "      Steps |      2 |      1 |      3 |      0 | ",
        "",
        "",
        "  METRICS:",
        "   · Product size (Σ features): 1",
        "   · Test-set size (Σ test-variants): 3",
        "   · Coverage (Σ test-variants/feature): [3]",
        "",
        "",
    ]
    .join("\n");
    assert_eq!(transcript.stdout, expected_stdout);

    let expected_stderr = [
        "",
        "  FAILURES:",
        "",
        "1) Login --> Bad password --> empty --> Then: it is rejected",
        "",
        "  AssertionError: expected true to be false",
        "",
        "    Expected:",
        "",
        "      false",
        "",
        "    Actual:",
        "",
        "      true",
        "",
        "    at login.js:9:3",
        "",
        "",
        "",
        "*** WARNING: The following variants are marked as bugs but they are passing ***",
        "=".repeat(79).as_str(),
        " - Login --> Bad password --> too long",
        "",
        "",
        "",
    ]
    .join("\n");
    assert_eq!(transcript.stderr, expected_stderr);
}

#[test]
fn catalog_transcript() {
    let transcript = replay_plain(CATALOG_LOG);
    assert_eq!(transcript.result.expect("log is valid"), 21);

    let expected_stdout = [
        "",
        "Catalog",
        "",
        "\tAs a shopper",
        "\tI want to browse",
        "",
        "",
        "  Search",
        "    by name",
        "      ◊ Given: a catalog",
        "",
        "    by barcode [Manual]",
        "      ◊  When: a barcode is scanned [Manual]",
        "",
        "",
        "Checkout",
        "",
        "",
        "  Pay",
        "      ✗ 1) before each hook",
        "      ◦  Then: the receipt matches\r      ✗ 2) Then: the receipt matches",
        "",
        "",
        "",
        "            | passed | failed |  TOTAL | manual |",
        "  -----------------------------------------------",
        "   Features |      0 |      1 |      1 |      0 | ",
        "  Scenarios |      0 |      1 |      1 |      0 | ",
        "   Variants |      0 |      1 |      1 |      1 | ",
        "      Steps |      0 |      1 |      1 |      1 | ",
        "",
        "",
        "  METRICS:",
        "   · Product size (Σ features): 1",
        "   · Test-set size (Σ test-variants): 1 (1 manual)",
        "   · Coverage (Σ test-variants/feature): [2 (1 manual), 1]",
        "",
        "",
    ]
    .join("\n");
    assert_eq!(transcript.stdout, expected_stdout);

    let expected_stderr = [
        "",
        "  FAILURES:",
        "",
        "1) Checkout --> Pay --> before each hook",
        "",
        "  Uncaught TypeError: gateway is undefined",
        "",
        "    ",
        "",
        "",
        "2) Checkout --> Pay --> Then: the receipt matches",
        "",
        "  AssertionError: receipt mismatch",
        "",
        "    Expected:",
        "",
        "      undefined",
        "",
        "    Actual:",
        "",
        "      null",
        "",
        "    ",
        "",
        "",
        "",
        "*** WARNING: The following variants are failing but they are not marked as bugs ***",
        "=".repeat(83).as_str(),
        " - Checkout --> Pay",
        "",
        "",
        "",
    ]
    .join("\n");
    assert_eq!(transcript.stderr, expected_stderr);
}

#[test]
fn catalog_report() {
    let report = replay_plain(CATALOG_LOG).report;

    assert_eq!(
        report.stats.variants,
        LevelStats {
            passed: 0,
            failed: 1,
            manual: 1,
        }
    );
    let coverage: Vec<_> = report
        .coverage
        .iter()
        .map(|(feature, coverage)| (feature.as_str(), *coverage))
        .collect();
    assert_eq!(
        coverage,
        [
            ("Catalog", FeatureCoverage { total: 2, manual: 1 }),
            ("Checkout", FeatureCoverage { total: 1, manual: 0 }),
        ]
    );

    let ordinals: Vec<_> = report.failures.iter().map(|f| f.ordinal).collect();
    assert_eq!(ordinals, [1, 2]);
    assert!(report.warnings.buggy_but_passed.is_empty());
    assert_eq!(report.warnings.non_buggy_but_failed, ["Checkout --> Pay"]);
}

#[test]
fn themes_only_change_styling() {
    let plain = replay_plain(LOGIN_LOG);
    for theme in [Theme::Dark, Theme::Clear] {
        let mut builder = ReporterBuilder::default();
        builder.set_colorize(true).set_theme(theme);
        let colored = replay_with(&builder, LOGIN_LOG);

        assert!(colored.stdout.contains("\x1b["), "{theme:?} output is styled");
        assert_eq!(colored.report, plain.report);
        assert_eq!(
            strip_ansi(&colored.stdout),
            plain.stdout,
            "{theme:?} transcript matches plain text"
        );
        assert_eq!(strip_ansi(&colored.stderr), plain.stderr);
    }
}

/// Removes SGR sequences (`ESC [ ... m`).
fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
