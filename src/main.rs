mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::cmd::apply::{self, ApplyArgs};
use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::preview::{self, PreviewArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::standup::StandupUpdate;
use crate::error::AppResult;
use crate::infra::github::GitHubClient;

#[derive(Parser)]
#[command(
    name = "standup",
    author,
    version,
    about = "Record standup comments as rows in an issue's tables"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Append a comment to the standup tables of an issue.
    Apply(ApplyArgs),
    /// Apply a comment to a local markdown file.
    Preview(PreviewArgs),
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(error) = run(cli).await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> AppResult<()> {
    match cli.command {
        Commands::Config(args) => config_cmd::run(args.command),
        Commands::Preview(args) => run_preview(args),
        Commands::Apply(args) => run_apply(args).await,
    }
}

fn run_preview(args: PreviewArgs) -> AppResult<()> {
    let config = AppConfig::load()?;
    match preview::run(&config, &args)? {
        StandupUpdate::Updated {
            body,
            section,
            rows_added,
        } => {
            if args.write {
                println!(
                    "Added {rows_added} row(s) to the {} table in {}",
                    section.as_str(),
                    args.file.display()
                );
            } else {
                print!("{body}");
            }
        }
        StandupUpdate::Unchanged { section } => {
            println!(
                "No {} section in {}; nothing changed.",
                section.as_str(),
                args.file.display()
            );
        }
    }
    Ok(())
}

async fn run_apply(args: ApplyArgs) -> AppResult<()> {
    let config = AppConfig::load()?;

    if config.repository.is_none() {
        warn!("GitHub repository not configured; issue access will fail");
    }
    if config.github_token.is_none() {
        warn!("GitHub token not configured; issue access will fail");
    }

    let issue_tracker = Arc::new(GitHubClient::new(
        config.api_url.clone(),
        config.repository.clone(),
        config.github_token.clone(),
    ));
    let dry_run = args.dry_run;
    let context = AppContext::new(config, issue_tracker);

    let Some(outcome) = apply::run(&context, args).await? else {
        println!("Comment event ignored.");
        return Ok(());
    };

    match &outcome.update {
        StandupUpdate::Updated { body, section, .. } if dry_run => {
            println!("Dry run; body with the new {} rows:", section.as_str());
            print!("{body}");
        }
        StandupUpdate::Updated {
            section,
            rows_added,
            ..
        } if outcome.persisted => {
            println!(
                "Added {rows_added} row(s) to the {} table.",
                section.as_str()
            );
        }
        StandupUpdate::Updated { .. } => println!("Ticket body already up to date."),
        StandupUpdate::Unchanged { section } => {
            println!("No {} section in the ticket body; no update.", section.as_str());
        }
    }

    Ok(())
}
