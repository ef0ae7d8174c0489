use std::io::{self, Write};

use clap::{Args, Subcommand};

use crate::config::{DEFAULT_API_URL, StoredConfig, config_file_path};
use crate::domain::row::AgendaMode;
use crate::error::{AppError, AppResult};

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Run the interactive configuration wizard.
    Init,
    /// Show the stored configuration (secrets masked).
    Show,
    /// Map a platform handle to the name written into the tables.
    Alias {
        handle: String,
        /// Display name; omit together with --remove to delete the mapping.
        name: Option<String>,
        #[arg(long, conflicts_with = "name")]
        remove: bool,
    },
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Init => run_init(),
        ConfigCommand::Show => run_show(),
        ConfigCommand::Alias {
            handle,
            name,
            remove,
        } => run_alias(handle, name, remove),
    }
}

fn run_init() -> AppResult<()> {
    let mut cfg = StoredConfig::load()?;

    println!("Configuring standup.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!("Secrets are stored in the local config file; protect your filesystem accordingly.");
    println!();

    apply_prompt("GitHub repository (owner/name)", &mut cfg.repository, false)?;
    apply_prompt("GitHub token", &mut cfg.github_token, true)?;
    apply_prompt(
        &format!("GitHub API URL (default {DEFAULT_API_URL})"),
        &mut cfg.api_url,
        false,
    )?;
    apply_prompt("Agenda mode (split/single)", &mut cfg.agenda_mode, false)?;

    if let Some(mode) = cfg.agenda_mode.as_deref() {
        if AgendaMode::from_str(mode).is_none() {
            return Err(AppError::Configuration(format!(
                "unknown agenda mode '{mode}' (expected 'split' or 'single')"
            )));
        }
    }

    cfg.save()?;

    let path = config_file_path()?;
    println!("\nConfiguration saved to {}", path.display());
    Ok(())
}

fn run_show() -> AppResult<()> {
    let cfg = StoredConfig::load()?;
    let path = config_file_path()?;

    println!("Configuration file: {}", path.display());
    println!("GitHub repository: {}", display_value(&cfg.repository));
    println!("GitHub token: {}", mask_secret(&cfg.github_token));
    println!("GitHub API URL: {}", display_value(&cfg.api_url));
    println!("Agenda mode: {}", display_value(&cfg.agenda_mode));
    if cfg.display_names.is_empty() {
        println!("Display names: <none>");
    } else {
        println!("Display names:");
        for (handle, name) in &cfg.display_names {
            println!("  {handle} -> {name}");
        }
    }

    Ok(())
}

fn run_alias(handle: String, name: Option<String>, remove: bool) -> AppResult<()> {
    let handle = handle.trim().trim_start_matches('@').to_string();
    if handle.is_empty() {
        return Err(AppError::Configuration("handle must not be empty".to_string()));
    }

    let mut cfg = StoredConfig::load()?;
    match (name, remove) {
        (_, true) => {
            if cfg.display_names.remove(&handle).is_none() {
                println!("No display name stored for {handle}.");
                return Ok(());
            }
            println!("Removed display name for {handle}.");
        }
        (Some(name), false) if !name.trim().is_empty() => {
            let name = name.trim().to_string();
            println!("{handle} will be shown as {name}.");
            cfg.display_names.insert(handle, name);
        }
        _ => {
            return Err(AppError::Configuration(
                "a display name is required unless --remove is given".to_string(),
            ));
        }
    }
    cfg.save()
}

fn apply_prompt(field: &str, target: &mut Option<String>, secret: bool) -> AppResult<()> {
    match prompt(field, target.as_deref(), secret)? {
        PromptAction::Keep => {}
        PromptAction::Clear => *target = None,
        PromptAction::Set(value) => *target = Some(value),
    }
    Ok(())
}

fn prompt(field: &str, current: Option<&str>, secret: bool) -> AppResult<PromptAction> {
    let mut stdout = io::stdout();

    match (current, secret) {
        (Some(_), true) => write!(stdout, "{field} [****] (Enter to keep, '-' to clear): ")?,
        (Some(value), false) => {
            write!(stdout, "{field} [{value}] (Enter to keep, '-' to clear): ")?
        }
        (None, _) => write!(stdout, "{field} (Enter to skip): ")?,
    }
    stdout.flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(PromptAction::parse(&input))
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.len() > 6 => {
            let prefix = token.chars().take(3).collect::<String>();
            let suffix = token
                .chars()
                .rev()
                .take(3)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect::<String>();
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PromptAction {
    Keep,
    Clear,
    Set(String),
}

impl PromptAction {
    fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            PromptAction::Keep
        } else if trimmed == "-" {
            PromptAction::Clear
        } else {
            PromptAction::Set(trimmed.to_string())
        }
    }
}
