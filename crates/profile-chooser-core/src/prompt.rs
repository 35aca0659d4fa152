//! Interactive profile selection.
//!
//! The engine never draws UI itself; it asks a [`ProfilePrompt`] to pick one
//! of a list of names. [`MenuCommandPrompt`] drives any dmenu-compatible
//! chooser (rofi, dmenu, wofi, fuzzel) over stdin/stdout.

use std::io::Write;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChooserError, Result};

/// Blocking selection prompt. `Ok(None)` means the user dismissed it.
pub trait ProfilePrompt {
    fn choose(&self, title: &str, url: &str, options: &[String]) -> Result<Option<String>>;
}

/// External chooser invocation. `{title}` and `{url}` in `args` are substituted.
///
/// Set `escape_markup` for choosers that render Pango markup (rofi's `-mesg`),
/// otherwise a query string such as `?a=1&b=2` breaks the message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChooserCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub escape_markup: bool,
}

impl Default for ChooserCommand {
    fn default() -> Self {
        Self {
            program: "rofi".to_string(),
            args: ["-dmenu", "-i", "-p", "{title}", "-mesg", "url: {url}"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            escape_markup: true,
        }
    }
}

impl ChooserCommand {
    fn render_args(&self, title: &str, url: &str) -> Vec<String> {
        let (title, url) = if self.escape_markup {
            (markup_escape(title), markup_escape(url))
        } else {
            (title.to_string(), url.to_string())
        };
        self.args
            .iter()
            .map(|a| a.replace("{title}", &title).replace("{url}", &url))
            .collect()
    }
}

fn markup_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Pipes the options into a dmenu-style program and reads back the pick.
#[derive(Debug, Clone, Default)]
pub struct MenuCommandPrompt {
    command: ChooserCommand,
}

impl MenuCommandPrompt {
    pub fn new(command: ChooserCommand) -> Self {
        Self { command }
    }
}

impl ProfilePrompt for MenuCommandPrompt {
    fn choose(&self, title: &str, url: &str, options: &[String]) -> Result<Option<String>> {
        let program = &self.command.program;
        let mut child = Command::new(program)
            .args(self.command.render_args(title, url))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ChooserError::Prompt(format!("failed to run {program}: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            let menu = options.join("\n");
            // The chooser may exit before draining stdin; its answer still counts.
            if let Err(e) = stdin.write_all(menu.as_bytes()) {
                debug!("chooser closed stdin early: {e}");
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| ChooserError::Prompt(format!("failed to wait for {program}: {e}")))?;

        if !output.status.success() {
            debug!(status = %output.status, "chooser dismissed");
            return Ok(None);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let choice = stdout.lines().next().map(str::trim).unwrap_or_default();
        if choice.is_empty() {
            Ok(None)
        } else {
            Ok(Some(choice.to_string()))
        }
    }
}
