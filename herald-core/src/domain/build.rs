//! Build domain types

use serde::{Deserialize, Serialize};

/// Metadata of one completed CI build
///
/// Produced by the build-lookup stage and consumed by commit resolution
/// and message composition. All fields are populated before handoff; a
/// build without resolvable repository data is a lookup error, not a
/// `BuildInfo` with empty strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildInfo {
    /// Source repository URL the build checked out
    pub repo_url: String,
    /// Commit hash the build ran against
    pub sha: String,
    /// Build number within the job
    pub number: u32,
    /// Terminal result of the build
    pub result: BuildResult,
}

/// Terminal result status of a CI build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildResult {
    Success,
    Failure,
    Abort,
    Unstable,
    /// Any result string the CI server reports that is not one of the
    /// four known literals (including an absent result)
    Unknown,
}

impl BuildResult {
    /// Map a CI result string to a `BuildResult`
    ///
    /// The match is case-sensitive and exact; everything else falls to
    /// [`BuildResult::Unknown`].
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("SUCCESS") => BuildResult::Success,
            Some("FAILURE") => BuildResult::Failure,
            Some("ABORT") => BuildResult::Abort,
            Some("UNSTABLE") => BuildResult::Unstable,
            _ => BuildResult::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_results() {
        assert_eq!(BuildResult::parse(Some("SUCCESS")), BuildResult::Success);
        assert_eq!(BuildResult::parse(Some("FAILURE")), BuildResult::Failure);
        assert_eq!(BuildResult::parse(Some("ABORT")), BuildResult::Abort);
        assert_eq!(BuildResult::parse(Some("UNSTABLE")), BuildResult::Unstable);
    }

    #[test]
    fn unrecognized_results_are_unknown() {
        assert_eq!(BuildResult::parse(Some("success")), BuildResult::Unknown);
        assert_eq!(BuildResult::parse(Some("ABORTED")), BuildResult::Unknown);
        assert_eq!(BuildResult::parse(Some("")), BuildResult::Unknown);
        assert_eq!(BuildResult::parse(None), BuildResult::Unknown);
    }
}
