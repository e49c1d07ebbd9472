// SPDX-License-Identifier: MIT

//! Optional configuration file.
//!
//! `seqdiff.toml` in the platform configuration directory, e.g.
//!
//! ```toml
//! [diff]
//! threshold_length = 1000
//! threshold_size = 4096
//!
//! [prefixes]
//! equal = "  "
//!
//! [markers]
//! start = "<<<<<<< old"
//! end = ">>>>>>> new"
//! ```
//!
//! Every table and key is optional.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::Deserialize;

use crate::diff::{DiffOptions, Markers, Prefixes};
use crate::utils::{self, try_forward, Result};

pub const CONFIG_FILE_NAME: &str = "seqdiff.toml";

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub diff: DiffOptions,
    pub prefixes: Prefixes,
    pub markers: Markers,
}

pub fn get_project_dirs() -> Option<&'static ProjectDirs> {
    lazy_static! {
        static ref PROJECT_DIRS: Option<ProjectDirs> = ProjectDirs::from("", "", "seqdiff");
    }
    PROJECT_DIRS.as_ref()
}

/// Location of the default configuration file, if the platform has a
/// configuration directory.
pub fn default_config_path() -> Option<PathBuf> {
    get_project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

pub fn parse_config(text: &str) -> Result<Config> {
    Ok(toml::from_str(text)?)
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    try_forward(
        || parse_config(&utils::read_text(path)?),
        || format!("Error loading {}", path.display()),
    )
}

/// Load the default configuration file. A missing file is not an error.
pub fn load_config() -> Result<Config> {
    match default_config_path() {
        Some(path) if path.exists() => {
            log::debug!("loading configuration from {}", path.display());
            load_config_from(&path)
        }
        _ => Ok(Config::default()),
    }
}
