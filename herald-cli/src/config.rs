//! Configuration module
//!
//! Handles CLI configuration including CI server URL, job selection,
//! and speech settings. Built once at startup and passed into the
//! pipeline; there is no global mutable state.

use std::path::PathBuf;

use herald_client::pipeline::PipelineConfig;

/// Default CI server URL
pub const DEFAULT_CI_URL: &str = "http://localhost:8080";

/// Default job to inspect
pub const DEFAULT_JOB: &str = "polly-test";

/// Default synthesis voice
pub const DEFAULT_VOICE: &str = "Joanna";

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Verbose logging enabled
    pub debug: bool,
    /// URL of the CI server
    pub ci_url: String,
    /// CI job to inspect
    pub job: String,
    /// Directory for the audio file; system temp dir when `None`
    pub output: Option<PathBuf>,
    /// Synthesis voice identifier
    pub voice: String,
    /// Credential profile name for the speech service
    pub account: String,
}

impl Config {
    /// Assemble the pipeline configuration for one run
    ///
    /// The hosting API and credentials file locations stay at their
    /// defaults; only tests override those.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            ci_url: self.ci_url.clone(),
            job: self.job.clone(),
            hosting_url: None,
            output_dir: self.output.clone(),
            voice: self.voice.clone(),
            account: self.account.clone(),
            credentials_path: None,
        }
    }
}
