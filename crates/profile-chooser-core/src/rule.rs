//! Rules pair one condition with one action.

use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionSpec};
use crate::condition::{Condition, ConditionSpec};
use crate::context::InvocationContext;
use crate::error::ConfigError;

/// One `deciders` entry in the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleSpec {
    pub rule: ConditionSpec,
    pub opener: ActionSpec,
}

impl RuleSpec {
    pub fn compile(&self, rule_index: usize) -> Result<Rule, ConfigError> {
        Ok(Rule {
            condition: self.rule.compile(rule_index)?,
            action: self.opener.compile(rule_index)?,
        })
    }
}

/// A compiled rule.
#[derive(Debug, Clone)]
pub struct Rule {
    pub condition: Condition,
    pub action: Action,
}

impl Rule {
    pub fn new(condition: Condition, action: Action) -> Self {
        Self { condition, action }
    }

    pub fn matches(&self, ctx: &InvocationContext) -> bool {
        self.condition.satisfied(ctx)
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.condition, self.action)
    }
}
