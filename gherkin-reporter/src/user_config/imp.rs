// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User config implementation.

use super::discovery::user_config_path;
use crate::{errors::UserConfigError, reporter::Theme};
use camino::Utf8Path;
use serde::Deserialize;
use std::{collections::BTreeSet, io};
use tracing::{debug, warn};

/// Special value for `--user-config-file` and `GHERKIN_REPORT_CONFIG` that skips user
/// config loading entirely.
pub const USER_CONFIG_NONE: &str = "none";

/// Specifies where to load user configuration from.
#[derive(Clone, Copy, Debug)]
pub enum UserConfigLocation<'a> {
    /// Look for the user config at the default location.
    Default,

    /// Skip user config loading entirely, using only built-in defaults.
    ///
    /// This is useful for test isolation.
    Isolated,

    /// Load user config from an explicit path.
    ///
    /// Returns an error if the file does not exist.
    Explicit(&'a Utf8Path),
}

impl<'a> UserConfigLocation<'a> {
    /// Creates a user config location from a CLI or environment variable value.
    ///
    /// Returns `Default` if `None`, `Isolated` if `"none"`, otherwise
    /// `Explicit` with the path.
    pub fn from_cli_or_env(s: Option<&'a str>) -> Self {
        match s {
            None => Self::Default,
            Some(s) if s == USER_CONFIG_NONE => Self::Isolated,
            Some(s) => Self::Explicit(Utf8Path::new(s)),
        }
    }
}

/// Whether to colorize output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UiColor {
    /// Colorize if the output stream supports it.
    #[default]
    Auto,

    /// Always colorize.
    Always,

    /// Never colorize.
    Never,
}

/// User configuration after the user file has been applied over the defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserConfig {
    /// Resolved UI configuration.
    pub ui: UiConfig,
}

/// Resolved UI configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UiConfig {
    /// The color theme.
    pub theme: Theme,

    /// Whether to colorize output.
    pub color: UiColor,
}

impl UserConfig {
    /// Loads user configuration from `location` and resolves it against the
    /// built-in defaults.
    pub fn load(location: UserConfigLocation<'_>) -> Result<Self, UserConfigError> {
        let user_config = DeserializedUserConfig::from_location(location)?;
        let defaults = DefaultUserConfig::from_embedded();
        Ok(Self::resolve(&defaults, user_config.as_ref()))
    }

    fn resolve(defaults: &DefaultUserConfig, user: Option<&DeserializedUserConfig>) -> Self {
        let user_ui = user.map(|config| &config.ui);
        let theme = user_ui
            .and_then(|ui| ui.theme.as_deref())
            .unwrap_or(defaults.ui.theme.as_str());
        let color = user_ui
            .and_then(|ui| ui.color)
            .unwrap_or(defaults.ui.color);

        Self {
            ui: UiConfig {
                theme: Theme::from_name(theme),
                color,
            },
        }
    }
}

/// User configuration as written in the user's file. Every setting is optional.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DeserializedUserConfig {
    #[serde(default)]
    ui: DeserializedUiConfig,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DeserializedUiConfig {
    /// Kept as a string: unknown theme names fall back to the default theme
    /// rather than failing to parse.
    theme: Option<String>,
    color: Option<UiColor>,
}

impl DeserializedUserConfig {
    fn from_location(location: UserConfigLocation<'_>) -> Result<Option<Self>, UserConfigError> {
        match location {
            UserConfigLocation::Isolated => {
                debug!("user config: skipping (isolated)");
                Ok(None)
            }
            UserConfigLocation::Explicit(path) => {
                debug!("user config: loading from explicit path {path}");
                match Self::from_path(path)? {
                    Some(config) => Ok(Some(config)),
                    None => Err(UserConfigError::FileNotFound {
                        path: path.to_owned(),
                    }),
                }
            }
            UserConfigLocation::Default => match user_config_path()? {
                Some(path) => Self::from_path(&path),
                None => {
                    debug!("user config: could not determine config directory");
                    Ok(None)
                }
            },
        }
    }

    /// Loads user config from a specific path, warning about unknown keys.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    fn from_path(path: &Utf8Path) -> Result<Option<Self>, UserConfigError> {
        let Some((config, unknown)) = Self::read(path)? else {
            return Ok(None);
        };
        if !unknown.is_empty() {
            warn!(
                "in user config file {path}, ignoring unknown configuration keys: {}",
                unknown.into_iter().collect::<Vec<_>>().join(", "),
            );
        }
        debug!("user config: loaded successfully from {path}");
        Ok(Some(config))
    }

    /// Reads and parses the file at `path`, along with any unknown keys in it.
    fn read(path: &Utf8Path) -> Result<Option<(Self, BTreeSet<String>)>, UserConfigError> {
        debug!("user config: attempting to load from {path}");
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!("user config: file does not exist at {path}");
                return Ok(None);
            }
            Err(error) => {
                return Err(UserConfigError::Read {
                    path: path.to_owned(),
                    error,
                });
            }
        };

        deserialize_toml::<Self>(&contents)
            .map(Some)
            .map_err(|error| UserConfigError::Parse {
                path: path.to_owned(),
                error,
            })
    }
}

/// Deserializes TOML, collecting the paths of keys that were not recognized.
fn deserialize_toml<T>(contents: &str) -> Result<(T, BTreeSet<String>), toml::de::Error>
where
    T: for<'de> Deserialize<'de>,
{
    let deserializer = toml::Deserializer::parse(contents)?;
    let mut unknown = BTreeSet::new();
    let config = serde_ignored::deserialize(deserializer, |path| {
        unknown.insert(path.to_string());
    })?;
    Ok((config, unknown))
}

/// The built-in defaults. Every setting is required.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DefaultUserConfig {
    ui: DefaultUiConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DefaultUiConfig {
    theme: String,
    color: UiColor,
}

impl DefaultUserConfig {
    /// The embedded default user config TOML.
    const DEFAULT_CONFIG: &'static str = include_str!("../../default-user-config.toml");

    /// Parses the default config.
    ///
    /// Panics if the embedded TOML is invalid or contains unknown keys.
    fn from_embedded() -> Self {
        let (config, unknown) = deserialize_toml::<Self>(Self::DEFAULT_CONFIG)
            .expect("embedded default user config should be valid");

        // The default config ships with the binary, so unknown keys are a bug.
        if !unknown.is_empty() {
            panic!(
                "found unknown keys in default user config: {}",
                unknown.into_iter().collect::<Vec<_>>().join(", ")
            );
        }
        config
    }
}
