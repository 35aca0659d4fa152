//! Rule actions: what happens once a rule's condition holds.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::context::InvocationContext;
use crate::error::{ConfigError, Result};
use crate::launch::{build_command_line, LaunchSettings, Launcher};
use crate::profiles::ProfileDirectory;
use crate::prompt::ProfilePrompt;

/// Title shown on the interactive chooser.
pub const PROMPT_TITLE: &str = "choose profile";

/// Declarative action ("opener") as written in the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionSpec {
    /// Always open with `profile`.
    Fixed { profile: String },
    /// Ask the user to pick among every profile in the registry.
    AskAny,
    /// Ask the user to pick among `profiles`.
    AskFromList { profiles: Vec<String> },
}

impl ActionSpec {
    /// Validate into a runtime [`Action`]. `rule_index` is only used for error reporting.
    pub fn compile(&self, rule_index: usize) -> std::result::Result<Action, ConfigError> {
        match self {
            ActionSpec::Fixed { profile } => Ok(Action::FixedProfile(profile.clone())),
            ActionSpec::AskAny => Ok(Action::ChooseFromAll),
            ActionSpec::AskFromList { profiles } => {
                if profiles.is_empty() {
                    return Err(ConfigError::EmptyProfileList { rule_index });
                }
                Ok(Action::ChooseFromList(profiles.clone()))
            }
        }
    }
}

/// A validated action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    FixedProfile(String),
    ChooseFromList(Vec<String>),
    ChooseFromAll,
}

/// Result of executing one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "profile", rename_all = "snake_case")]
pub enum LaunchOutcome {
    /// The browser was handed off with this profile.
    Launched(String),
    /// There was nothing to choose from; no prompt was shown.
    NoSelection,
    /// The user dismissed the prompt or picked something not offered.
    Cancelled,
}

impl LaunchOutcome {
    pub fn is_launched(&self) -> bool {
        matches!(self, LaunchOutcome::Launched(_))
    }
}

/// Side-effecting capabilities an action may use.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub directory: &'a dyn ProfileDirectory,
    pub prompt: &'a dyn ProfilePrompt,
    pub launcher: &'a dyn Launcher,
}

impl Action {
    /// Execute the action for `ctx`. May block on the prompt and may launch.
    pub fn execute(
        &self,
        ctx: &InvocationContext,
        settings: &LaunchSettings,
        collab: &Collaborators<'_>,
    ) -> Result<LaunchOutcome> {
        match self {
            Action::FixedProfile(profile) => launch_profile(profile, ctx, settings, collab),
            Action::ChooseFromList(profiles) => {
                choose_and_launch(profiles, ctx, settings, collab)
            }
            Action::ChooseFromAll => {
                let names = collab.directory.list_profiles(&settings.profiles_dir)?;
                let candidates: Vec<String> = names.into_iter().collect();
                choose_and_launch(&candidates, ctx, settings, collab)
            }
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::FixedProfile(p) => write!(f, "fixed({p})"),
            Action::ChooseFromList(ps) => write!(f, "ask_from_list({})", ps.join(", ")),
            Action::ChooseFromAll => write!(f, "ask_any"),
        }
    }
}

fn choose_and_launch(
    candidates: &[String],
    ctx: &InvocationContext,
    settings: &LaunchSettings,
    collab: &Collaborators<'_>,
) -> Result<LaunchOutcome> {
    if candidates.is_empty() {
        info!("no profiles to choose from; skipping prompt");
        return Ok(LaunchOutcome::NoSelection);
    }

    debug!(count = candidates.len(), "prompting for profile");
    match collab.prompt.choose(PROMPT_TITLE, ctx.url(), candidates)? {
        Some(choice) if candidates.contains(&choice) => {
            launch_profile(&choice, ctx, settings, collab)
        }
        Some(choice) => {
            info!(%choice, "selection is not an offered profile; ignoring");
            Ok(LaunchOutcome::Cancelled)
        }
        None => {
            info!("profile prompt dismissed");
            Ok(LaunchOutcome::Cancelled)
        }
    }
}

fn launch_profile(
    profile: &str,
    ctx: &InvocationContext,
    settings: &LaunchSettings,
    collab: &Collaborators<'_>,
) -> Result<LaunchOutcome> {
    let command_line = build_command_line(settings, profile, ctx);
    collab.launcher.launch(&command_line)?;
    Ok(LaunchOutcome::Launched(profile.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{
        test_settings as settings, RecordingLauncher, ScriptedPrompt, StaticProfileDirectory,
    };

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fixed_profile_launches_without_prompt_or_directory() {
        let directory = StaticProfileDirectory::new(["default"]);
        let prompt = ScriptedPrompt::picking("default");
        let launcher = RecordingLauncher::new();
        let collab = Collaborators {
            directory: &directory,
            prompt: &prompt,
            launcher: &launcher,
        };

        for url in ["https://a.example", "", "mailto:x@y"] {
            let ctx = InvocationContext::for_url(url);
            let outcome = Action::FixedProfile("work".into())
                .execute(&ctx, &settings(), &collab)
                .unwrap();
            assert_eq!(outcome, LaunchOutcome::Launched("work".into()));
        }
        assert_eq!(directory.calls(), 0);
        assert!(prompt.calls().is_empty());
        assert_eq!(launcher.launched().len(), 3);
    }

    #[test]
    fn test_choose_from_list_launches_pick() {
        let directory = StaticProfileDirectory::new(Vec::<String>::new());
        let prompt = ScriptedPrompt::picking("a");
        let launcher = RecordingLauncher::new();
        let collab = Collaborators {
            directory: &directory,
            prompt: &prompt,
            launcher: &launcher,
        };
        let ctx = InvocationContext::for_url("https://x.example");

        let outcome = Action::ChooseFromList(names(&["a", "b"]))
            .execute(&ctx, &settings(), &collab)
            .unwrap();

        assert_eq!(outcome, LaunchOutcome::Launched("a".into()));
        let calls = prompt.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].title, PROMPT_TITLE);
        assert_eq!(calls[0].url, "https://x.example");
        assert_eq!(calls[0].options, names(&["a", "b"]));
        assert_eq!(launcher.launched(), vec!["firefox -P a 'https://x.example'"]);
    }

    #[test]
    fn test_choose_from_list_dismissed_is_cancelled() {
        let directory = StaticProfileDirectory::new(Vec::<String>::new());
        let prompt = ScriptedPrompt::dismissing();
        let launcher = RecordingLauncher::new();
        let collab = Collaborators {
            directory: &directory,
            prompt: &prompt,
            launcher: &launcher,
        };
        let ctx = InvocationContext::for_url("https://x.example");

        let outcome = Action::ChooseFromList(names(&["a", "b"]))
            .execute(&ctx, &settings(), &collab)
            .unwrap();

        assert_eq!(outcome, LaunchOutcome::Cancelled);
        assert!(launcher.launched().is_empty());
    }

    #[test]
    fn test_pick_outside_candidates_is_cancelled() {
        let directory = StaticProfileDirectory::new(Vec::<String>::new());
        let prompt = ScriptedPrompt::picking("typed-in");
        let launcher = RecordingLauncher::new();
        let collab = Collaborators {
            directory: &directory,
            prompt: &prompt,
            launcher: &launcher,
        };
        let ctx = InvocationContext::for_url("https://x.example");

        let outcome = Action::ChooseFromList(names(&["a"]))
            .execute(&ctx, &settings(), &collab)
            .unwrap();
        assert_eq!(outcome, LaunchOutcome::Cancelled);
        assert!(launcher.launched().is_empty());
    }

    #[test]
    fn test_choose_from_all_offers_directory_names() {
        let directory = StaticProfileDirectory::new(["work", "default"]);
        let prompt = ScriptedPrompt::picking("work");
        let launcher = RecordingLauncher::new();
        let collab = Collaborators {
            directory: &directory,
            prompt: &prompt,
            launcher: &launcher,
        };
        let ctx = InvocationContext::for_url("https://x.example");

        let outcome = Action::ChooseFromAll
            .execute(&ctx, &settings(), &collab)
            .unwrap();

        assert_eq!(outcome, LaunchOutcome::Launched("work".into()));
        assert_eq!(directory.calls(), 1);
        assert_eq!(prompt.calls()[0].options, names(&["default", "work"]));
    }

    #[test]
    fn test_choose_from_all_empty_directory_skips_prompt() {
        let directory = StaticProfileDirectory::new(Vec::<String>::new());
        let prompt = ScriptedPrompt::picking("anything");
        let launcher = RecordingLauncher::new();
        let collab = Collaborators {
            directory: &directory,
            prompt: &prompt,
            launcher: &launcher,
        };
        let ctx = InvocationContext::for_url("https://x.example");

        let outcome = Action::ChooseFromAll
            .execute(&ctx, &settings(), &collab)
            .unwrap();

        assert_eq!(outcome, LaunchOutcome::NoSelection);
        assert!(prompt.calls().is_empty());
        assert!(launcher.launched().is_empty());
    }

    #[test]
    fn test_empty_ask_from_list_rejected_at_compile() {
        let err = ActionSpec::AskFromList { profiles: vec![] }
            .compile(2)
            .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyProfileList { rule_index: 2 }));
    }

    #[test]
    fn test_action_spec_yaml_tags() {
        let spec: ActionSpec = serde_yaml::from_str("type: fixed\nprofile: personal").unwrap();
        assert_eq!(
            spec,
            ActionSpec::Fixed {
                profile: "personal".into()
            }
        );
        let spec: ActionSpec = serde_yaml::from_str("type: ask_any").unwrap();
        assert_eq!(spec, ActionSpec::AskAny);
        let spec: ActionSpec =
            serde_yaml::from_str("type: ask_from_list\nprofiles: [a, b]").unwrap();
        assert_eq!(
            spec,
            ActionSpec::AskFromList {
                profiles: names(&["a", "b"])
            }
        );
    }

    #[test]
    fn test_fixed_without_profile_rejected() {
        let result: std::result::Result<ActionSpec, _> = serde_yaml::from_str("type: fixed");
        assert!(result.is_err());
    }
}
