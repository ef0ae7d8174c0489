use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::AppConfig;
use crate::domain::standup::{StandupUpdate, apply_comment};
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct PreviewArgs {
    /// Markdown file holding a ticket body.
    #[arg(short, long)]
    pub file: PathBuf,
    /// Comment author handle.
    #[arg(long)]
    pub author: String,
    /// Comment text.
    #[arg(long)]
    pub comment: String,
    /// Rewrite the file instead of printing the result.
    #[arg(long)]
    pub write: bool,
}

pub fn run(config: &AppConfig, args: &PreviewArgs) -> AppResult<StandupUpdate> {
    let body = fs::read_to_string(&args.file)?;
    let update = apply_comment(&body, &args.author, &args.comment, &config.standup_options());
    if let StandupUpdate::Updated { body: updated, .. } = &update {
        if args.write && *updated != body {
            fs::write(&args.file, updated)?;
        }
    }
    Ok(update)
}
