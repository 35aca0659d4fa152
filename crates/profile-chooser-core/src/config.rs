//! YAML configuration: launch settings plus the ordered rule list.
//!
//! ```yaml
//! browser_binary_path: /usr/bin/firefox
//! profiles_dir: ~/.mozilla/firefox
//! deciders:
//!   - rule: { type: url_search_regex, pattern: "mail\\." }
//!     opener: { type: fixed, profile: personal }
//!   - rule: { type: match_all }
//!     opener: { type: ask_any }
//! ```
//!
//! `firefox_binary_path` and `firefox_config_dir` are accepted as aliases
//! for the first two keys. Optional `launcher` and `chooser` sections
//! override the window-manager hand-off and the interactive menu command:
//!
//! ```yaml
//! launcher: { program: swaymsg, args: [exec] }          # quoting: wm_string | raw
//! chooser: { program: wofi, args: [--dmenu, -p, "{title}"] }  # escape_markup: false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::DecisionEngine;
use crate::error::ConfigError;
use crate::launch::{LaunchSettings, LauncherCommand};
use crate::prompt::ChooserCommand;
use crate::rule::{Rule, RuleSpec};

/// Config file name looked up in the home directory.
pub const DEFAULT_CONFIG_FILE: &str = ".profile-chooser.yml";

/// Raw configuration document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(alias = "firefox_binary_path")]
    pub browser_binary_path: String,

    #[serde(alias = "firefox_config_dir")]
    pub profiles_dir: String,

    /// Evaluated top to bottom; the first matching entry decides.
    #[serde(alias = "rules")]
    pub deciders: Vec<RuleSpec>,

    #[serde(default)]
    pub launcher: LauncherCommand,

    #[serde(default)]
    pub chooser: ChooserCommand,
}

/// A fully validated configuration, ready to run.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub engine: DecisionEngine,
    pub launcher: LauncherCommand,
    pub chooser: ChooserCommand,
}

impl ConfigFile {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Self::from_yaml_str(&content)
    }

    /// Compile every rule, expand `~/` in paths, and validate commands.
    pub fn compile(&self) -> Result<LoadedConfig, ConfigError> {
        if self.launcher.program.trim().is_empty() {
            return Err(ConfigError::EmptyCommand { field: "launcher" });
        }
        if self.chooser.program.trim().is_empty() {
            return Err(ConfigError::EmptyCommand { field: "chooser" });
        }

        let rules = self
            .deciders
            .iter()
            .enumerate()
            .map(|(idx, spec)| spec.compile(idx))
            .collect::<Result<Vec<Rule>, _>>()?;

        let settings = LaunchSettings {
            binary_path: expand_home(&self.browser_binary_path)?,
            profiles_dir: expand_home(&self.profiles_dir)?,
        };
        debug!(rules = rules.len(), "compiled config");

        Ok(LoadedConfig {
            engine: DecisionEngine::new(settings, rules),
            launcher: self.launcher.clone(),
            chooser: self.chooser.clone(),
        })
    }
}

/// Load and compile the config at `path`.
pub fn load_config(path: &Path) -> Result<LoadedConfig, ConfigError> {
    ConfigFile::load(path)?.compile()
}

/// `~/.profile-chooser.yml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_CONFIG_FILE))
        .ok_or(ConfigError::NoHomeDir)
}

fn expand_home(raw: &str) -> Result<PathBuf, ConfigError> {
    let rest = match raw.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return Ok(PathBuf::from(raw)),
    };
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(if rest.is_empty() { home } else { home.join(rest) })
}
