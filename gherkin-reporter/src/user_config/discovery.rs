// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Discovery of the user config file.

use crate::errors::UserConfigError;
use camino::Utf8PathBuf;
use etcetera::{BaseStrategy, HomeDirError, base_strategy::Xdg};

/// The directory under the config home that holds the user config.
const CONFIG_DIR_NAME: &str = "gherkin-report";

/// Returns the path the user config file is looked up at, if a config home can
/// be determined.
///
/// This is `$XDG_CONFIG_HOME/gherkin-report/config.toml`, or
/// `~/.config/gherkin-report/config.toml` if `XDG_CONFIG_HOME` is unset. The
/// XDG layout is used on every platform.
pub fn user_config_path() -> Result<Option<Utf8PathBuf>, UserConfigError> {
    let strategy = match Xdg::new() {
        Ok(strategy) => strategy,
        Err(HomeDirError) => return Ok(None),
    };

    let config_path = strategy
        .config_dir()
        .join(CONFIG_DIR_NAME)
        .join("config.toml");
    Utf8PathBuf::try_from(config_path)
        .map(Some)
        .map_err(|error| UserConfigError::NonUtf8Path { error })
}
