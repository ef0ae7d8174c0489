use async_trait::async_trait;

use crate::error::AppResult;

/// A comment as posted on a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueComment {
    pub author: String,
    pub body: String,
}

#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    async fn fetch_ticket_body(&self, issue: u64) -> AppResult<String>;
    async fn update_ticket_body(&self, issue: u64, body: &str) -> AppResult<()>;
    async fn fetch_comment(&self, comment_id: u64) -> AppResult<IssueComment>;
}
