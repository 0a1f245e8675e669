//! Commit domain types
//!
//! Repository references derived from checkout URLs and the resolved
//! commit author/message pair.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised when a repository URL cannot be reduced to owner/name
#[derive(Debug, Error)]
#[error("cannot derive owner and repository from URL: {url}")]
pub struct RepoRefError {
    /// The URL that failed to parse
    pub url: String,
}

/// An owner/repository pair on the hosting service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name, without any `.git` suffix
    pub name: String,
}

impl RepoRef {
    /// Derive an owner/name pair from a checkout URL
    ///
    /// The owner is the second-to-last `/`-delimited segment and the
    /// name is the last segment with a trailing `.git` stripped. The
    /// transform is purely syntactic and idempotent with respect to the
    /// optional suffix; it does not validate the hosting service.
    pub fn parse(url: &str) -> Result<Self, RepoRefError> {
        let mut segments = url.trim_end_matches('/').rsplit('/');

        let name = segments
            .next()
            .map(|s| s.strip_suffix(".git").unwrap_or(s))
            .filter(|s| !s.is_empty());
        let owner = segments.next().filter(|s| !s.is_empty());

        match (owner, name) {
            (Some(owner), Some(name)) => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(RepoRefError {
                url: url.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Author and message of the commit a build ran against
///
/// Produced by commit resolution, consumed by message composition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Author display name exactly as the hosting API reports it
    pub author: String,
    /// First line of the commit message
    pub summary: String,
}

/// Truncate a commit message to its first line
///
/// Text before the first newline; the whole message when it has none.
pub fn first_line(message: &str) -> &str {
    message.split('\n').next().unwrap_or(message)
}
