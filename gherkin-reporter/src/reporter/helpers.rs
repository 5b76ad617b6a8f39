// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use owo_colors::Style;
use std::fmt;

/// A color theme for the transcript.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Theme {
    /// Colors for dark terminal backgrounds.
    #[default]
    Dark,

    /// Colors for light terminal backgrounds.
    Clear,
}

impl Theme {
    /// Returns the names of all themes.
    pub fn variants() -> &'static [&'static str] {
        &["dark", "clear"]
    }

    /// Returns the theme's name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Clear => "clear",
        }
    }

    /// Parses a theme name, returning `None` for unknown names.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "dark" => Some(Theme::Dark),
            "clear" => Some(Theme::Clear),
            _ => None,
        }
    }

    /// Parses a theme name, falling back to [`Theme::Dark`] for unknown names.
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            tracing::warn!(
                "unknown theme `{name}` (known themes: {}), using `dark`",
                Self::variants().join(", "),
            );
            Theme::Dark
        })
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A semantic role that text plays in the transcript.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum StyleRole {
    /// A feature title.
    FeatureTitle,
    /// A pending feature title.
    FeatureTitlePending,
    /// A feature narrative line.
    FeatureSubtitle,
    /// A narrative line of a pending feature.
    FeatureSubtitlePending,
    /// A scenario title.
    Scenario,
    /// A pending scenario title.
    ScenarioPending,
    /// A variant title.
    Variant,
    /// A pending variant title.
    VariantPending,
    /// A step keyword label.
    StepLabel,
    /// A step's text.
    StepText,
    /// A pending step keyword label.
    StepLabelPending,
    /// A pending step's text.
    StepTextPending,
    /// A failed step keyword label.
    StepLabelFailed,
    /// A failed step's text.
    StepTextFailed,
    /// A failed hook.
    HookFailed,
    /// A step duration.
    Duration,
    /// A step symbol, and the passed column.
    Symbol,
    /// The pending step symbol.
    SymbolPending,
    /// The failed step symbol, and the failed column.
    SymbolFailed,
    /// The manual column.
    SymbolManual,
    /// Failure titles and warning entries.
    FailureText,
    /// Failure messages and warning headings.
    FailureMessage,
    /// The `Expected:` heading.
    FailureExpected,
    /// An expected value.
    FailureExpectedValue,
    /// The `Actual:` heading.
    FailureActual,
    /// An actual value.
    FailureActualValue,
    /// A stack trace.
    FailureStack,
}

/// Resolves the style for `role` under `theme`.
pub fn resolve(theme: Theme, role: StyleRole) -> Style {
    let s = Style::new();
    match (theme, role) {
        (Theme::Dark, StyleRole::FeatureTitle) => s.green().bold().underline(),
        (Theme::Dark, StyleRole::FeatureTitlePending) => s.green().bold().underline().italic(),
        (Theme::Dark, StyleRole::FeatureSubtitle) => s.white(),
        (Theme::Dark, StyleRole::FeatureSubtitlePending) => s.white().italic(),
        (Theme::Dark, StyleRole::Scenario) => s.bright_green(),
        (Theme::Dark, StyleRole::ScenarioPending) => s.bright_green().italic(),
        (Theme::Dark, StyleRole::Variant) => s.cyan(),
        (Theme::Dark, StyleRole::VariantPending) => s.cyan().italic(),
        (Theme::Dark, StyleRole::StepText) => s.bright_white(),
        (Theme::Dark, StyleRole::StepTextPending) => s.bright_white().italic(),
        (Theme::Dark, StyleRole::FailureText) => s.white().bold(),
        (Theme::Dark, StyleRole::FailureExpected) => s.on_bright_green(),
        (Theme::Dark, StyleRole::FailureExpectedValue) => s.bright_green(),
        (Theme::Dark, StyleRole::FailureActual) => s.on_bright_red(),
        (Theme::Dark, StyleRole::FailureStack) => s.white(),

        (Theme::Clear, StyleRole::FeatureTitle) => s.blue().bold().underline(),
        (Theme::Clear, StyleRole::FeatureTitlePending) => s.blue().bold().underline().italic(),
        (Theme::Clear, StyleRole::FeatureSubtitle) => s.bright_black(),
        (Theme::Clear, StyleRole::FeatureSubtitlePending) => s.bright_black().italic(),
        (Theme::Clear, StyleRole::Scenario) => s.bright_blue(),
        (Theme::Clear, StyleRole::ScenarioPending) => s.bright_blue().italic(),
        (Theme::Clear, StyleRole::Variant) => s.green(),
        (Theme::Clear, StyleRole::VariantPending) => s.green().italic(),
        (Theme::Clear, StyleRole::StepText) => s.black(),
        (Theme::Clear, StyleRole::StepTextPending) => s.black().italic(),
        (Theme::Clear, StyleRole::FailureText) => s.black().bold(),
        (Theme::Clear, StyleRole::FailureExpected) => s.on_green().bright_white(),
        (Theme::Clear, StyleRole::FailureExpectedValue) => s.green(),
        (Theme::Clear, StyleRole::FailureActual) => s.on_bright_red().bright_white(),
        (Theme::Clear, StyleRole::FailureStack) => s.bright_black(),

        // Shared by both themes.
        (_, StyleRole::StepLabel) => s.yellow(),
        (_, StyleRole::StepLabelPending) => s.yellow().italic(),
        (_, StyleRole::StepLabelFailed | StyleRole::StepTextFailed | StyleRole::HookFailed) => {
            s.red()
        }
        (_, StyleRole::Duration) => s.magenta().italic().bold(),
        (_, StyleRole::Symbol) => s.green(),
        (_, StyleRole::SymbolPending) => s.bright_black(),
        (_, StyleRole::SymbolFailed) => s.red(),
        (_, StyleRole::SymbolManual) => s.bright_cyan(),
        (_, StyleRole::FailureMessage) => s.red(),
        (_, StyleRole::FailureActualValue) => s.bright_red(),
    }
}

/// The styles in effect for one run.
///
/// Built once when the run starts and never changed until the next run. With
/// colors disabled every style is plain, so text passes through unchanged.
#[derive(Clone, Debug, Default)]
pub(crate) struct Styles {
    pub(crate) is_colorized: bool,
    pub(crate) feature_title: Style,
    pub(crate) feature_title_pending: Style,
    pub(crate) feature_subtitle: Style,
    pub(crate) feature_subtitle_pending: Style,
    pub(crate) scenario: Style,
    pub(crate) scenario_pending: Style,
    pub(crate) variant: Style,
    pub(crate) variant_pending: Style,
    pub(crate) step_label: Style,
    pub(crate) step_text: Style,
    pub(crate) step_label_pending: Style,
    pub(crate) step_text_pending: Style,
    pub(crate) step_label_failed: Style,
    pub(crate) step_text_failed: Style,
    pub(crate) hook_failed: Style,
    pub(crate) duration: Style,
    pub(crate) symbol: Style,
    pub(crate) symbol_pending: Style,
    pub(crate) symbol_failed: Style,
    pub(crate) symbol_manual: Style,
    pub(crate) failure_text: Style,
    pub(crate) failure_message: Style,
    pub(crate) failure_expected: Style,
    pub(crate) failure_expected_value: Style,
    pub(crate) failure_actual: Style,
    pub(crate) failure_actual_value: Style,
    pub(crate) failure_stack: Style,
}

impl Styles {
    pub(crate) fn new(theme: Theme, colorize: bool) -> Self {
        let mut styles = Self::default();
        if colorize {
            styles.colorize(theme);
        }
        styles
    }

    fn colorize(&mut self, theme: Theme) {
        let r = |role| resolve(theme, role);
        self.is_colorized = true;
        self.feature_title = r(StyleRole::FeatureTitle);
        self.feature_title_pending = r(StyleRole::FeatureTitlePending);
        self.feature_subtitle = r(StyleRole::FeatureSubtitle);
        self.feature_subtitle_pending = r(StyleRole::FeatureSubtitlePending);
        self.scenario = r(StyleRole::Scenario);
        self.scenario_pending = r(StyleRole::ScenarioPending);
        self.variant = r(StyleRole::Variant);
        self.variant_pending = r(StyleRole::VariantPending);
        self.step_label = r(StyleRole::StepLabel);
        self.step_text = r(StyleRole::StepText);
        self.step_label_pending = r(StyleRole::StepLabelPending);
        self.step_text_pending = r(StyleRole::StepTextPending);
        self.step_label_failed = r(StyleRole::StepLabelFailed);
        self.step_text_failed = r(StyleRole::StepTextFailed);
        self.hook_failed = r(StyleRole::HookFailed);
        self.duration = r(StyleRole::Duration);
        self.symbol = r(StyleRole::Symbol);
        self.symbol_pending = r(StyleRole::SymbolPending);
        self.symbol_failed = r(StyleRole::SymbolFailed);
        self.symbol_manual = r(StyleRole::SymbolManual);
        self.failure_text = r(StyleRole::FailureText);
        self.failure_message = r(StyleRole::FailureMessage);
        self.failure_expected = r(StyleRole::FailureExpected);
        self.failure_expected_value = r(StyleRole::FailureExpectedValue);
        self.failure_actual = r(StyleRole::FailureActual);
        self.failure_actual_value = r(StyleRole::FailureActualValue);
        self.failure_stack = r(StyleRole::FailureStack);
    }

    /// Adds italics to `style`, unless output is plain.
    pub(crate) fn italic(&self, style: Style) -> Style {
        if self.is_colorized {
            style.italic()
        } else {
            style
        }
    }
}

/// Characters used to draw step lines.
#[derive(Clone, Debug)]
pub(crate) struct ThemeCharacters {
    pub(crate) pending: &'static str,
    pub(crate) running: &'static str,
    pub(crate) ok: &'static str,
    pub(crate) err: &'static str,
}

impl Default for ThemeCharacters {
    fn default() -> Self {
        Self {
            pending: "~",
            running: "-",
            ok: "+",
            err: "x",
        }
    }
}

impl ThemeCharacters {
    pub(crate) fn use_unicode(&mut self) {
        self.pending = "◊";
        self.running = "◦";
        self.ok = "✓";
        self.err = "✗";
    }
}
