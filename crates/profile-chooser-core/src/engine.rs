//! Decision engine — first-match-wins over an ordered rule list.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::action::{Collaborators, LaunchOutcome};
use crate::context::InvocationContext;
use crate::error::Result;
use crate::launch::LaunchSettings;
use crate::rule::Rule;

/// Outcome of one engine run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    /// Rule `rule_index` matched and its action produced `outcome`.
    Matched {
        rule_index: usize,
        outcome: LaunchOutcome,
    },
    /// No rule's condition held; nothing was executed.
    NoMatch,
}

impl Decision {
    pub fn launched_profile(&self) -> Option<&str> {
        match self {
            Decision::Matched {
                outcome: LaunchOutcome::Launched(profile),
                ..
            } => Some(profile),
            _ => None,
        }
    }
}

/// Ordered rules plus the launch settings they run with.
///
/// Built once per run from configuration and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    settings: LaunchSettings,
    rules: Vec<Rule>,
}

impl DecisionEngine {
    pub fn new(settings: LaunchSettings, rules: Vec<Rule>) -> Self {
        Self { settings, rules }
    }

    pub fn settings(&self) -> &LaunchSettings {
        &self.settings
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The first rule whose condition holds for `ctx`, without executing it.
    pub fn first_match(&self, ctx: &InvocationContext) -> Option<(usize, &Rule)> {
        self.rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(ctx))
    }

    /// Evaluate rules in declaration order and execute the first matching action.
    ///
    /// Evaluation stops at the first match even when its action launches
    /// nothing (`Cancelled`, `NoSelection`).
    pub fn run(&self, ctx: &InvocationContext, collab: &Collaborators<'_>) -> Result<Decision> {
        debug!(url = ctx.url(), rules = self.rules.len(), "evaluating rules");

        let Some((rule_index, rule)) = self.first_match(ctx) else {
            info!(url = ctx.url(), "no rule matched");
            return Ok(Decision::NoMatch);
        };

        info!(rule_index, rule = %rule, "rule matched");
        let outcome = rule.action.execute(ctx, &self.settings, collab)?;
        info!(rule_index, ?outcome, "action finished");

        Ok(Decision::Matched {
            rule_index,
            outcome,
        })
    }
}
