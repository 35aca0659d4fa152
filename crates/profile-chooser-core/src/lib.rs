//! profile-chooser core library
//!
//! Decides which browser profile opens a link. An ordered list of rules,
//! each a [`Condition`] on the URL paired with an [`Action`], is evaluated
//! first-match-wins by the [`DecisionEngine`]. Actions either launch a fixed
//! profile or ask the user through an injected [`ProfilePrompt`].
//!
//! # Modules
//!
//! - [`context`]   — `InvocationContext` (url + raw args)
//! - [`condition`] — `Condition` / `ConditionSpec`
//! - [`action`]    — `Action` / `ActionSpec`, `LaunchOutcome`, `Collaborators`
//! - [`rule`]      — `Rule` / `RuleSpec`
//! - [`engine`]    — `DecisionEngine`, `Decision`
//! - [`config`]    — YAML loading and compilation
//! - [`profiles`]  — `ProfileDirectory`, `profiles.ini` parsing
//! - [`prompt`]    — `ProfilePrompt`, dmenu-style `MenuCommandPrompt`
//! - [`launch`]    — `Launcher`, command-line construction
//! - [`fakes`]     — in-memory collaborators for tests

pub mod action;
pub mod condition;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod fakes;
pub mod launch;
pub mod profiles;
pub mod prompt;
pub mod rule;

pub use action::{Action, ActionSpec, Collaborators, LaunchOutcome, PROMPT_TITLE};
pub use condition::{Condition, ConditionSpec};
pub use config::{default_config_path, load_config, ConfigFile, LoadedConfig, DEFAULT_CONFIG_FILE};
pub use context::InvocationContext;
pub use engine::{Decision, DecisionEngine};
pub use error::{ChooserError, ConfigError, ContextError, DirectoryReadError, Result};
pub use launch::{
    build_command_line, shell_quote, wm_quote, HandOffQuoting, LaunchSettings, Launcher,
    LauncherCommand, WindowManagerLauncher,
};
pub use profiles::{parse_profile_names, IniProfileDirectory, ProfileDirectory, PROFILES_INI};
pub use prompt::{ChooserCommand, MenuCommandPrompt, ProfilePrompt};
pub use rule::{Rule, RuleSpec};

/// profile-chooser version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
