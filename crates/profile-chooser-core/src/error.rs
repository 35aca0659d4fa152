//! Error taxonomy for profile selection.

use std::path::PathBuf;

/// Errors building the per-run invocation context.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("no url given: expected `<url> [extra-args...]`")]
    MissingUrl,
}

/// Errors loading or compiling the rule configuration.
///
/// Every variant is fatal and surfaces before any rule is evaluated.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("rule #{rule_index}: invalid url pattern {pattern:?}: {source}")]
    InvalidPattern {
        rule_index: usize,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("rule #{rule_index}: ask_from_list needs at least one profile")]
    EmptyProfileList { rule_index: usize },

    #[error("{field} command must not be empty")]
    EmptyCommand { field: &'static str },

    #[error("could not determine home directory")]
    NoHomeDir,
}

/// Errors reading the browser's profile registry.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryReadError {
    #[error("failed to read profile registry {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed profile registry at line {line}: {content:?}")]
    Malformed { line: usize, content: String },
}

/// Top-level error for a profile-chooser run.
#[derive(Debug, thiserror::Error)]
pub enum ChooserError {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    DirectoryRead(#[from] DirectoryReadError),

    #[error("launch failed: {0}")]
    Launch(String),

    #[error("profile prompt failed: {0}")]
    Prompt(String),
}

/// Result type for profile-chooser operations.
pub type Result<T> = std::result::Result<T, ChooserError>;
