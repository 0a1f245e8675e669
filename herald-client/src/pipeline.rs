//! Sequential notification pipeline
//!
//! Chains the four stages — build lookup, commit resolution, message
//! composition, speech rendering — strictly in order. A failure at any
//! stage aborts the run; there are no retries and no partial output.

use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::ci::CiClient;
use crate::credentials::Credentials;
use crate::error::ClientError;
use crate::hosting::HostingClient;
use crate::speech::SpeechClient;
use herald_core::domain::commit::RepoRef;
use herald_core::message::compose_status;

/// Everything one pipeline run needs, assembled once at startup
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Base URL of the CI server
    pub ci_url: String,
    /// CI job to inspect
    pub job: String,
    /// Override for the hosting API base URL; the public hosting API
    /// when `None`
    pub hosting_url: Option<String>,
    /// Directory for the audio file; the system temp dir when `None`
    pub output_dir: Option<PathBuf>,
    /// Synthesis voice identifier
    pub voice: String,
    /// Credential profile name for the speech service
    pub account: String,
    /// Explicit credentials file path; environment/default resolution
    /// when `None`
    pub credentials_path: Option<PathBuf>,
}

/// Failure of one pipeline stage
///
/// All four kinds surface as exit code 1 at the CLI; only the message
/// differs. The kind exists so the caller can name the failed stage
/// without re-deriving it from the underlying error.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// CI server, job, or build action-list problem
    #[error("build lookup failed: {0}")]
    BuildLookup(#[source] ClientError),

    /// Unparsable repository URL or hosting API problem
    #[error("commit resolution failed: {0}")]
    CommitResolution(#[source] ClientError),

    /// Credential, quota, or missing-audio problem
    #[error("speech synthesis failed: {0}")]
    Synthesis(#[source] ClientError),

    /// Audio file could not be written
    #[error("could not write audio file: {0}")]
    Io(#[source] std::io::Error),
}

impl PipelineError {
    /// Short stage label for log output
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::BuildLookup(_) => "build-lookup",
            PipelineError::CommitResolution(_) => "commit-resolution",
            PipelineError::Synthesis(_) => "synthesis",
            PipelineError::Io(_) => "io",
        }
    }
}

/// Run the notification pipeline once
///
/// # Arguments
/// * `config` - The pipeline configuration
///
/// # Returns
/// The path of the written audio file
pub async fn run(config: &PipelineConfig) -> Result<PathBuf, PipelineError> {
    info!(url = %config.ci_url, job = %config.job, "connecting to CI server");
    let ci = CiClient::new(&config.ci_url);
    let build = ci
        .latest_completed_build(&config.job)
        .await
        .map_err(PipelineError::BuildLookup)?;
    info!(
        number = build.number,
        repo = %build.repo_url,
        sha = %build.sha,
        result = ?build.result,
        "resolved latest completed build"
    );

    let repo = RepoRef::parse(&build.repo_url)
        .map_err(|e| PipelineError::CommitResolution(e.into()))?;
    let hosting = match &config.hosting_url {
        Some(url) => HostingClient::with_base_url(url),
        None => HostingClient::new(),
    };
    let commit = hosting
        .commit(&repo, &build.sha)
        .await
        .map_err(PipelineError::CommitResolution)?;
    info!(author = %commit.author, summary = %commit.summary, "resolved commit");

    let text = compose_status(&commit, &build, &config.job);

    let credentials = Credentials::load(config.credentials_path.as_deref(), &config.account)
        .map_err(PipelineError::Synthesis)?;
    let speech = SpeechClient::new(credentials);
    let out_dir = config
        .output_dir
        .clone()
        .unwrap_or_else(std::env::temp_dir);

    let path = speech
        .render_to_file(&text, &config.voice, &out_dir)
        .await
        .map_err(|e| match e {
            ClientError::Io(io) => PipelineError::Io(io),
            other => PipelineError::Synthesis(other),
        })?;
    info!(path = %path.display(), "build status audio written");

    Ok(path)
}
