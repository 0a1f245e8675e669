//! CI server client
//!
//! Queries the CI server's JSON API for job metadata and per-build
//! detail, and resolves the latest completed build of a job into a
//! [`BuildInfo`].

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::handle_json;
use herald_core::domain::build::{BuildInfo, BuildResult};

/// Job metadata as reported by the CI server
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobInfo {
    last_completed_build: Option<BuildRef>,
}

/// Reference to a build within a job
#[derive(Debug, Deserialize)]
struct BuildRef {
    number: u32,
}

/// Detail record of a single build
#[derive(Debug, Deserialize)]
struct BuildDetail {
    result: Option<String>,
    #[serde(default)]
    actions: Vec<BuildAction>,
}

/// One entry of a build's action list
///
/// The action list is heterogeneous; only entries that carry both the
/// checkout remote URLs and the built revision are of interest here.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildAction {
    #[serde(default)]
    remote_urls: Vec<String>,
    last_built_revision: Option<BuiltRevision>,
}

/// Revision record inside a source-control build action
#[derive(Debug, Deserialize)]
struct BuiltRevision {
    #[serde(rename = "SHA1")]
    sha1: String,
}

/// HTTP client for the CI server's JSON API
#[derive(Debug, Clone)]
pub struct CiClient {
    /// Base URL of the CI server (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl CiClient {
    /// Create a new CI client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the CI server
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Get the base URL of the CI server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve the most recent *completed* build of a job
    ///
    /// An in-progress build is never returned; the lookup follows the
    /// job's last-completed-build pointer. A job with no completed
    /// build, or a build whose action list carries no repository
    /// revision entry, is an error — empty fields never propagate.
    ///
    /// # Arguments
    /// * `job` - The CI job name
    ///
    /// # Returns
    /// The build's repository URL, commit hash, number, and result
    pub async fn latest_completed_build(&self, job: &str) -> Result<BuildInfo> {
        let info = self.job_info(job).await?;
        let number = info
            .last_completed_build
            .map(|b| b.number)
            .ok_or_else(|| ClientError::NoCompletedBuild(job.to_string()))?;

        let detail = self.build_info(job, number).await?;
        debug!(job, number, result = ?detail.result, "fetched build detail");

        let (repo_url, sha) = detail
            .actions
            .iter()
            .find_map(|action| {
                let url = action.remote_urls.first()?;
                let revision = action.last_built_revision.as_ref()?;
                Some((url.clone(), revision.sha1.clone()))
            })
            .ok_or_else(|| ClientError::MissingRevision(job.to_string()))?;

        Ok(BuildInfo {
            repo_url,
            sha,
            number,
            result: BuildResult::parse(detail.result.as_deref()),
        })
    }

    /// Fetch job metadata
    async fn job_info(&self, job: &str) -> Result<JobInfo> {
        let url = format!("{}/job/{}/api/json", self.base_url, job);
        let response = self.client.get(&url).send().await?;

        handle_json(response).await
    }

    /// Fetch the detail record of one build
    async fn build_info(&self, job: &str, number: u32) -> Result<BuildDetail> {
        let url = format!("{}/job/{}/{}/api/json", self.base_url, job, number);
        let response = self.client.get(&url).send().await?;

        handle_json(response).await
    }
}
