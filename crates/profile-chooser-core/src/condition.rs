//! Rule conditions: predicates over the invocation context.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::context::InvocationContext;
use crate::error::ConfigError;

/// Declarative condition as written in the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConditionSpec {
    /// Always satisfied.
    MatchAll,
    /// Satisfied when `pattern` matches anywhere in the URL.
    UrlSearchRegex { pattern: String },
}

impl ConditionSpec {
    /// Compile into a runtime [`Condition`]. `rule_index` is only used for error reporting.
    pub fn compile(&self, rule_index: usize) -> Result<Condition, ConfigError> {
        match self {
            ConditionSpec::MatchAll => Ok(Condition::MatchAll),
            ConditionSpec::UrlSearchRegex { pattern } => Regex::new(pattern)
                .map(Condition::UrlRegex)
                .map_err(|source| ConfigError::InvalidPattern {
                    rule_index,
                    pattern: pattern.clone(),
                    source,
                }),
        }
    }
}

/// A compiled condition.
#[derive(Debug, Clone)]
pub enum Condition {
    MatchAll,
    /// Unanchored search against the URL.
    UrlRegex(Regex),
}

impl Condition {
    /// Returns `true` if this condition holds for `ctx`.
    pub fn satisfied(&self, ctx: &InvocationContext) -> bool {
        match self {
            Condition::MatchAll => true,
            Condition::UrlRegex(re) => re.is_match(ctx.url()),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::MatchAll => write!(f, "match_all"),
            Condition::UrlRegex(re) => write!(f, "url_search_regex({})", re.as_str()),
        }
    }
}
