//! Browser launch: command-line construction and the window-manager hand-off.

use std::path::PathBuf;
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::context::InvocationContext;
use crate::error::{ChooserError, Result};

/// Browser binary and profile registry location for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSettings {
    pub binary_path: PathBuf,
    pub profiles_dir: PathBuf,
}

/// Starts a detached browser process from a full shell command line.
pub trait Launcher {
    fn launch(&self, command_line: &str) -> Result<()>;
}

/// How the shell command line is wrapped before it is handed off.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HandOffQuoting {
    /// i3/sway command syntax: one double-quoted string, so `,` and `;`
    /// inside the URL are not read as command separators.
    #[default]
    WmString,
    /// Pass the command line through untouched (`sh -c`, `setsid`, ...).
    Raw,
}

/// External command used to hand a command line to the window manager.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LauncherCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub quoting: HandOffQuoting,
}

impl Default for LauncherCommand {
    fn default() -> Self {
        Self {
            program: "i3-msg".to_string(),
            args: vec!["exec".to_string()],
            quoting: HandOffQuoting::WmString,
        }
    }
}

impl LauncherCommand {
    /// The final argument passed to `program` for `command_line`.
    pub fn hand_off_arg(&self, command_line: &str) -> String {
        match self.quoting {
            HandOffQuoting::WmString => wm_quote(command_line),
            HandOffQuoting::Raw => command_line.to_string(),
        }
    }
}

/// Runs `<program> <args...> <command_line>`, e.g. `i3-msg exec "<cmd>"`.
///
/// Only the hand-off command is awaited; it returns as soon as the window
/// manager has queued the browser, which is never observed afterwards.
#[derive(Debug, Clone, Default)]
pub struct WindowManagerLauncher {
    command: LauncherCommand,
}

impl WindowManagerLauncher {
    pub fn new(command: LauncherCommand) -> Self {
        Self { command }
    }
}

impl Launcher for WindowManagerLauncher {
    fn launch(&self, command_line: &str) -> Result<()> {
        info!(launcher = %self.command.program, "launching: {}", command_line);
        let output = Command::new(&self.command.program)
            .args(&self.command.args)
            .arg(self.command.hand_off_arg(command_line))
            .output()
            .map_err(|e| {
                ChooserError::Launch(format!("failed to run {}: {e}", self.command.program))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ChooserError::Launch(format!(
                "{} exited with {}: {}",
                self.command.program,
                output.status,
                stderr.trim()
            )));
        }
        debug!("launcher accepted command");
        Ok(())
    }
}

/// Build `<binary> -P <profile> <args>` where `<args>` is every invocation
/// argument joined by spaces and quoted as a single shell word.
pub fn build_command_line(
    settings: &LaunchSettings,
    profile: &str,
    ctx: &InvocationContext,
) -> String {
    let binary = settings.binary_path.to_string_lossy();
    format!(
        "{} -P {} {}",
        quote_if_needed(&binary),
        quote_if_needed(profile),
        shell_quote(&ctx.raw_args().join(" "))
    )
}

/// POSIX single-quote `s`.
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Double-quote `s` for the i3/sway command parser, which only unescapes
/// `\\` and `\"` inside a quoted string.
pub fn wm_quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

fn quote_if_needed(s: &str) -> String {
    let safe = !s.is_empty()
        && s.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '-' | '_' | '+' | ',' | '@' | '%')
        });
    if safe {
        s.to_string()
    } else {
        shell_quote(s)
    }
}
