use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder, Response,
    header::{ACCEPT, AUTHORIZATION, USER_AGENT},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::services::{IssueComment, IssueTrackerService};

const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";

pub struct GitHubClient {
    http: Client,
    api_url: String,
    repository: Option<String>,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(api_url: String, repository: Option<String>, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            api_url,
            repository,
            token,
        }
    }

    fn api_details(&self) -> AppResult<(&str, &str)> {
        let repository = self
            .repository
            .as_deref()
            .filter(|repo| repo.contains('/'))
            .ok_or_else(|| {
                AppError::Configuration(
                    "GitHub repository not configured (expected owner/name)".to_string(),
                )
            })?;
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| AppError::Configuration("GitHub token not configured".to_string()))?;
        Ok((repository, token))
    }

    fn issue_endpoint(api_url: &str, repository: &str, issue: u64) -> String {
        format!(
            "{}/repos/{}/issues/{}",
            api_url.trim_end_matches('/'),
            repository,
            issue
        )
    }

    fn comment_endpoint(api_url: &str, repository: &str, comment_id: u64) -> String {
        format!(
            "{}/repos/{}/issues/comments/{}",
            api_url.trim_end_matches('/'),
            repository,
            comment_id
        )
    }

    fn authorized(&self, request: RequestBuilder, token: &str) -> RequestBuilder {
        request
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, concat!("standup/", env!("CARGO_PKG_VERSION")))
            .header(API_VERSION_HEADER, API_VERSION)
    }

    async fn send(request: RequestBuilder) -> AppResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|err| AppError::IssueTracker(format!("failed to call GitHub: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::IssueTracker(format!(
                "GitHub responded with {status}: {body}"
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl IssueTrackerService for GitHubClient {
    async fn fetch_ticket_body(&self, issue: u64) -> AppResult<String> {
        let (repository, token) = self.api_details()?;
        let url = Self::issue_endpoint(&self.api_url, repository, issue);
        debug!(%url, "fetching issue body");

        let response = Self::send(self.authorized(self.http.get(url), token)).await?;
        let payload: GitHubIssue = response.json().await.map_err(|err| {
            AppError::IssueTracker(format!("failed to parse GitHub issue: {err}"))
        })?;
        Ok(payload.body.unwrap_or_default())
    }

    async fn update_ticket_body(&self, issue: u64, body: &str) -> AppResult<()> {
        let (repository, token) = self.api_details()?;
        let url = Self::issue_endpoint(&self.api_url, repository, issue);
        debug!(%url, bytes = body.len(), "updating issue body");

        let request = self
            .authorized(self.http.patch(url), token)
            .json(&GitHubIssueUpdate { body });
        Self::send(request).await?;
        Ok(())
    }

    async fn fetch_comment(&self, comment_id: u64) -> AppResult<IssueComment> {
        let (repository, token) = self.api_details()?;
        let url = Self::comment_endpoint(&self.api_url, repository, comment_id);
        debug!(%url, "fetching comment");

        let response = Self::send(self.authorized(self.http.get(url), token)).await?;
        let payload: GitHubComment = response.json().await.map_err(|err| {
            AppError::IssueTracker(format!("failed to parse GitHub comment: {err}"))
        })?;
        Ok(payload.into())
    }
}

#[derive(Deserialize)]
struct GitHubIssue {
    body: Option<String>,
}

#[derive(Serialize)]
struct GitHubIssueUpdate<'a> {
    body: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct GitHubComment {
    pub(crate) body: Option<String>,
    pub(crate) user: GitHubUser,
}

#[derive(Deserialize)]
pub(crate) struct GitHubUser {
    pub(crate) login: String,
}

impl From<GitHubComment> for IssueComment {
    fn from(comment: GitHubComment) -> Self {
        IssueComment {
            author: comment.user.login,
            body: comment.body.unwrap_or_default(),
        }
    }
}
