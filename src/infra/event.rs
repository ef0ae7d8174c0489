use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::infra::github::GitHubComment;
use crate::services::IssueComment;

/// An `issue_comment` webhook payload, as handed to workflow runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentEvent {
    pub action: String,
    pub issue: u64,
    pub comment: IssueComment,
}

impl CommentEvent {
    pub fn load(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|err| {
            AppError::Event(format!("failed to read {}: {err}", path.display()))
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> AppResult<Self> {
        let payload: EventPayload = serde_json::from_str(contents)
            .map_err(|err| AppError::Event(format!("invalid issue_comment payload: {err}")))?;
        Ok(Self {
            action: payload.action,
            issue: payload.issue.number,
            comment: payload.comment.into(),
        })
    }

    pub fn is_new_comment(&self) -> bool {
        self.action == "created"
    }
}

#[derive(Deserialize)]
struct EventPayload {
    action: String,
    issue: EventIssue,
    comment: GitHubComment,
}

#[derive(Deserialize)]
struct EventIssue {
    number: u64,
}
