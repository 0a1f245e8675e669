//! Repository-hosting API client
//!
//! Resolves a commit hash in an owner/repository pair to the author's
//! display name and the first line of the commit message.

use reqwest::Client;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::handle_json;
use herald_core::domain::commit::{CommitInfo, RepoRef, first_line};

/// Default hosting API base URL
pub const DEFAULT_HOSTING_URL: &str = "https://api.github.com";

/// User agent the hosting API requires on every request
const HERALD_USER_AGENT: &str = "herald";

/// A commit object as returned by the hosting API
#[derive(Debug, Deserialize)]
struct CommitResponse {
    commit: CommitDetail,
}

/// The author and message for a commit
#[derive(Debug, Deserialize)]
struct CommitDetail {
    author: CommitAuthor,
    message: String,
}

/// The author record inside a commit
#[derive(Debug, Deserialize)]
struct CommitAuthor {
    name: String,
}

/// HTTP client for the hosting service's commit-lookup API
#[derive(Debug, Clone)]
pub struct HostingClient {
    /// Base URL of the hosting API
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl Default for HostingClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HostingClient {
    /// Create a client against the public hosting API
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_HOSTING_URL)
    }

    /// Create a client against a custom API base URL
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the hosting API
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Get the base URL of the hosting API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a commit to its author name and message summary
    ///
    /// The author name is returned exactly as the API reports it; the
    /// message is truncated to its first line.
    ///
    /// # Arguments
    /// * `repo` - The owner/repository pair
    /// * `sha` - The commit hash
    pub async fn commit(&self, repo: &RepoRef, sha: &str) -> Result<CommitInfo> {
        let url = format!(
            "{}/repos/{}/{}/commits/{}",
            self.base_url, repo.owner, repo.name, sha
        );
        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, HERALD_USER_AGENT)
            .send()
            .await?;

        let commit: CommitResponse = handle_json(response).await?;
        debug!(%repo, sha, author = %commit.commit.author.name, "resolved commit");

        Ok(CommitInfo {
            author: commit.commit.author.name,
            summary: first_line(&commit.commit.message).to_string(),
        })
    }
}
