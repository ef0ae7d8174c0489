use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::infra::event::CommentEvent;
use crate::services::IssueComment;
use crate::workflow::standup::{
    CommentSource, StandupRequest, StandupWorkflowOutcome, record_comment,
};

pub const EVENT_PATH_ENV: &str = "GITHUB_EVENT_PATH";

#[derive(Args, Debug, Clone)]
pub struct ApplyArgs {
    /// Issue number whose body holds the standup tables.
    #[arg(short, long)]
    pub issue: Option<u64>,
    /// Fetch the comment with this id from the tracker.
    #[arg(long, conflicts_with_all = ["author", "comment", "event"])]
    pub comment_id: Option<u64>,
    /// Author of an inline comment.
    #[arg(long, requires = "comment", conflicts_with = "event")]
    pub author: Option<String>,
    /// Inline comment text.
    #[arg(long, requires = "author", conflicts_with = "event")]
    pub comment: Option<String>,
    /// issue_comment event payload (defaults to $GITHUB_EVENT_PATH).
    #[arg(long)]
    pub event: Option<PathBuf>,
    /// Print the updated body instead of writing it back.
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(ctx: &AppContext, args: ApplyArgs) -> AppResult<Option<StandupWorkflowOutcome>> {
    let event_path = std::env::var_os(EVENT_PATH_ENV)
        .filter(|path| !path.is_empty())
        .map(PathBuf::from);
    match resolve_request(args, event_path)? {
        Some(request) => record_comment(ctx, request).await.map(Some),
        None => Ok(None),
    }
}

/// Works out which issue and comment to process; `None` means the event is ignored.
fn resolve_request(
    args: ApplyArgs,
    event_path: Option<PathBuf>,
) -> AppResult<Option<StandupRequest>> {
    let comment = match (args.comment_id, args.author, args.comment) {
        (Some(id), _, _) => Some(CommentSource::Remote(id)),
        (None, Some(author), Some(body)) => Some(CommentSource::Inline(IssueComment { author, body })),
        _ => None,
    };

    if let Some(comment) = comment {
        let issue = args.issue.ok_or_else(|| {
            AppError::Configuration("--issue is required with an explicit comment".to_string())
        })?;
        return Ok(Some(StandupRequest {
            issue,
            comment,
            dry_run: args.dry_run,
        }));
    }

    let path = args.event.or(event_path).ok_or_else(|| {
        AppError::Configuration(format!(
            "no comment given: pass --comment-id, --author/--comment, --event or set {EVENT_PATH_ENV}"
        ))
    })?;
    let event = CommentEvent::load(&path)?;
    if !event.is_new_comment() {
        info!(action = %event.action, "ignoring comment event");
        return Ok(None);
    }

    Ok(Some(StandupRequest {
        issue: args.issue.unwrap_or(event.issue),
        comment: CommentSource::Inline(event.comment),
        dry_run: args.dry_run,
    }))
}
