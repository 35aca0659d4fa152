//! profile-chooser - open a link in the right browser profile
//!
//! Register `profile-chooser` as the desktop's default browser. Each
//! invocation evaluates the rules in `~/.profile-chooser.yml` against the
//! URL and either launches a fixed profile or asks which one to use.
//!
//! ## Flags
//!
//! - `--dry-run`: show which rule would fire without prompting or launching
//! - `--check`: validate the config file and exit

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use profile_chooser_core::{
    build_command_line, default_config_path, load_config, Action, Collaborators, Decision,
    IniProfileDirectory, InvocationContext, LoadedConfig, MenuCommandPrompt,
    WindowManagerLauncher,
};

mod telemetry;

#[derive(Parser, Debug)]
#[command(name = "profile-chooser")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Open a link in a browser profile chosen by URL rules", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines (and JSON dry-run output)
    #[arg(long, global = true)]
    json: bool,

    /// Config file (default: ~/.profile-chooser.yml)
    #[arg(short, long, env = "PROFILE_CHOOSER_CONFIG")]
    config: Option<PathBuf>,

    /// Print the decision without prompting or launching
    #[arg(long)]
    dry_run: bool,

    /// Validate the config file and exit
    #[arg(long, conflicts_with = "dry_run")]
    check: bool,

    /// URL to open, followed by any extra arguments forwarded to the browser
    #[arg(
        value_name = "URL",
        required_unless_present = "check",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    args: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    telemetry::init(telemetry::default_level(cli.verbose), cli.json);

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => default_config_path().context("Failed to locate config file")?,
    };
    let loaded = load_config(&config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;

    if cli.check {
        return cmd_check(&config_path, &loaded);
    }

    let ctx = InvocationContext::from_args(cli.args)?;

    if cli.dry_run {
        return cmd_dry_run(&loaded, &ctx, cli.json);
    }

    cmd_open(&loaded, &ctx)
}

/// Evaluate the rules and run the winning action.
fn cmd_open(loaded: &LoadedConfig, ctx: &InvocationContext) -> Result<()> {
    let directory = IniProfileDirectory;
    let prompt = MenuCommandPrompt::new(loaded.chooser.clone());
    let launcher = WindowManagerLauncher::new(loaded.launcher.clone());
    let collab = Collaborators {
        directory: &directory,
        prompt: &prompt,
        launcher: &launcher,
    };

    let decision = loaded.engine.run(ctx, &collab)?;
    match &decision {
        Decision::Matched {
            rule_index,
            outcome,
        } => info!(rule_index, ?outcome, "done"),
        Decision::NoMatch => info!("no rule matched {}; nothing opened", ctx.url()),
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct DryRunReport {
    url: String,
    rule_index: Option<usize>,
    rule: Option<String>,
    /// Set only for fixed-profile rules; interactive rules would prompt.
    command_line: Option<String>,
}

fn build_dry_run(loaded: &LoadedConfig, ctx: &InvocationContext) -> DryRunReport {
    let matched = loaded.engine.first_match(ctx);
    DryRunReport {
        url: ctx.url().to_string(),
        rule_index: matched.map(|(idx, _)| idx),
        rule: matched.map(|(_, rule)| rule.to_string()),
        command_line: matched.and_then(|(_, rule)| match &rule.action {
            Action::FixedProfile(profile) => Some(build_command_line(
                loaded.engine.settings(),
                profile,
                ctx,
            )),
            Action::ChooseFromList(_) | Action::ChooseFromAll => None,
        }),
    }
}

fn render_dry_run_text(report: &DryRunReport) -> String {
    match (&report.rule_index, &report.rule) {
        (Some(idx), Some(rule)) => {
            let mut out = format!("rule #{idx} matched: {rule}");
            match &report.command_line {
                Some(cmd) => out.push_str(&format!("\nwould run: {cmd}")),
                None => out.push_str("\nwould prompt for a profile"),
            }
            out
        }
        _ => format!("no rule matches {}", report.url),
    }
}

/// Show which rule would fire, without side effects.
fn cmd_dry_run(loaded: &LoadedConfig, ctx: &InvocationContext, json: bool) -> Result<()> {
    let report = build_dry_run(loaded, ctx);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render_dry_run_text(&report));
    }
    Ok(())
}

/// Report a successfully compiled config.
fn cmd_check(path: &Path, loaded: &LoadedConfig) -> Result<()> {
    println!(
        "{}: ok ({} rule(s))",
        path.display(),
        loaded.engine.rules().len()
    );
    for (idx, rule) in loaded.engine.rules().iter().enumerate() {
        println!("  #{idx}: {rule}");
    }
    Ok(())
}
