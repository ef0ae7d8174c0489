use tracing::{info, warn};

use crate::context::AppContext;
use crate::domain::standup::{StandupUpdate, apply_comment};
use crate::error::AppResult;
use crate::services::IssueComment;

#[derive(Debug, Clone)]
pub enum CommentSource {
    /// Comment text already known to the caller.
    Inline(IssueComment),
    /// Comment id to fetch from the tracker.
    Remote(u64),
}

#[derive(Debug, Clone)]
pub struct StandupRequest {
    pub issue: u64,
    pub comment: CommentSource,
    pub dry_run: bool,
}

pub struct StandupWorkflowOutcome {
    pub update: StandupUpdate,
    pub persisted: bool,
}

pub async fn record_comment(
    ctx: &AppContext,
    request: StandupRequest,
) -> AppResult<StandupWorkflowOutcome> {
    let comment = match request.comment {
        CommentSource::Inline(comment) => comment,
        CommentSource::Remote(id) => ctx.issue_tracker.fetch_comment(id).await?,
    };

    let body = ctx.issue_tracker.fetch_ticket_body(request.issue).await?;
    let update = apply_comment(
        &body,
        &comment.author,
        &comment.body,
        &ctx.config.standup_options(),
    );

    let section = update.section().as_str();
    let persisted = match &update {
        StandupUpdate::Updated {
            body: updated,
            rows_added,
            ..
        } if *updated != body => {
            info!(
                issue = request.issue,
                section,
                rows_added,
                "appending standup rows"
            );
            if request.dry_run {
                false
            } else {
                ctx.issue_tracker
                    .update_ticket_body(request.issue, updated)
                    .await?;
                true
            }
        }
        StandupUpdate::Updated { .. } => false,
        StandupUpdate::Unchanged { .. } => {
            warn!(
                issue = request.issue,
                section,
                "section not found in ticket body; no update"
            );
            false
        }
    };

    Ok(StandupWorkflowOutcome { update, persisted })
}
