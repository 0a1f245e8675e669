//! Speech-service credential profiles
//!
//! Credentials live in a local TOML file holding named profiles, one
//! per speech-service account:
//!
//! ```toml
//! [profiles.notifier]
//! endpoint = "https://tts.example.com"
//! api_key = "..."
//! ```
//!
//! The file path defaults to `~/.config/herald/credentials.toml` and
//! can be overridden with the `HERALD_CREDENTIALS` environment
//! variable or an explicit path.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Environment variable overriding the credentials file location
pub const CREDENTIALS_ENV: &str = "HERALD_CREDENTIALS";

/// Credentials file location relative to the home directory
const DEFAULT_RELATIVE_PATH: &str = ".config/herald/credentials.toml";

/// One named credential profile for the speech service
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    /// Speech-service endpoint this profile authenticates against
    pub endpoint: String,
    /// API key presented as a bearer token
    pub api_key: String,
}

/// On-disk shape of the credentials file
#[derive(Debug, Deserialize)]
struct CredentialsFile {
    #[serde(default)]
    profiles: HashMap<String, Credentials>,
}

impl Credentials {
    /// Load a named profile from the credentials file
    ///
    /// # Arguments
    /// * `path` - Explicit file path; falls back to `HERALD_CREDENTIALS`
    ///   and then the default location when `None`
    /// * `profile` - The profile name to look up
    pub fn load(path: Option<&Path>, profile: &str) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_path()?,
        };
        debug!(path = %path.display(), profile, "loading speech credentials");

        let raw = std::fs::read_to_string(&path)?;
        let file: CredentialsFile = toml::from_str(&raw).map_err(|e| {
            ClientError::ParseError(format!(
                "invalid credentials file {}: {}",
                path.display(),
                e
            ))
        })?;

        file.profiles
            .get(profile)
            .cloned()
            .ok_or_else(|| ClientError::UnknownProfile(profile.to_string()))
    }
}

/// Resolve the credentials file location from the environment
fn default_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CREDENTIALS_ENV) {
        return Ok(PathBuf::from(path));
    }

    let home = std::env::var("HOME").map_err(|_| {
        ClientError::ParseError(format!(
            "cannot locate credentials file: HOME is unset and {} is not given",
            CREDENTIALS_ENV
        ))
    })?;
    Ok(PathBuf::from(home).join(DEFAULT_RELATIVE_PATH))
}
