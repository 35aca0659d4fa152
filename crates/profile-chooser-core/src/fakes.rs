//! In-memory collaborators (testing only)
//!
//! Provides `StaticProfileDirectory`, `ScriptedPrompt`, and `RecordingLauncher`
//! that satisfy the collaborator traits without touching the filesystem,
//! the display, or the window manager. Each one records its calls.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{DirectoryReadError, Result};
use crate::launch::Launcher;
use crate::profiles::ProfileDirectory;
use crate::prompt::ProfilePrompt;

// ---------------------------------------------------------------------------
// StaticProfileDirectory
// ---------------------------------------------------------------------------

/// Profile directory returning a fixed set of names, or a fixed read error.
#[derive(Debug)]
pub struct StaticProfileDirectory {
    names: Option<BTreeSet<String>>,
    calls: Mutex<usize>,
}

impl StaticProfileDirectory {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: Some(names.into_iter().map(Into::into).collect()),
            calls: Mutex::new(0),
        }
    }

    /// A directory whose registry cannot be read.
    pub fn unreadable() -> Self {
        Self {
            names: None,
            calls: Mutex::new(0),
        }
    }

    /// Number of `list_profiles` calls so far.
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl ProfileDirectory for StaticProfileDirectory {
    fn list_profiles(
        &self,
        profiles_dir: &Path,
    ) -> std::result::Result<BTreeSet<String>, DirectoryReadError> {
        *self.calls.lock().unwrap() += 1;
        self.names.clone().ok_or_else(|| DirectoryReadError::Io {
            path: profiles_dir.join(crate::profiles::PROFILES_INI),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no registry"),
        })
    }
}

// ---------------------------------------------------------------------------
// ScriptedPrompt
// ---------------------------------------------------------------------------

/// One recorded prompt invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptCall {
    pub title: String,
    pub url: String,
    pub options: Vec<String>,
}

/// Prompt that always answers with a scripted choice.
#[derive(Debug)]
pub struct ScriptedPrompt {
    answer: Option<String>,
    calls: Mutex<Vec<PromptCall>>,
}

impl ScriptedPrompt {
    /// The simulated user picks `choice`.
    pub fn picking(choice: impl Into<String>) -> Self {
        Self {
            answer: Some(choice.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// The simulated user closes the prompt.
    pub fn dismissing() -> Self {
        Self {
            answer: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<PromptCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl ProfilePrompt for ScriptedPrompt {
    fn choose(&self, title: &str, url: &str, options: &[String]) -> Result<Option<String>> {
        self.calls.lock().unwrap().push(PromptCall {
            title: title.to_string(),
            url: url.to_string(),
            options: options.to_vec(),
        });
        Ok(self.answer.clone())
    }
}

// ---------------------------------------------------------------------------
// RecordingLauncher
// ---------------------------------------------------------------------------

/// Launcher that records command lines instead of running them.
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    launched: Mutex<Vec<String>>,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn launched(&self) -> Vec<String> {
        self.launched.lock().unwrap().clone()
    }
}

impl Launcher for RecordingLauncher {
    fn launch(&self, command_line: &str) -> Result<()> {
        self.launched.lock().unwrap().push(command_line.to_string());
        Ok(())
    }
}

/// Settings pointing at a placeholder binary and profiles directory.
pub fn test_settings() -> crate::launch::LaunchSettings {
    crate::launch::LaunchSettings {
        binary_path: PathBuf::from("firefox"),
        profiles_dir: PathBuf::from("/profiles"),
    }
}
