//! Status message composition
//!
//! Pure rendering of the spoken build-status sentence. No I/O happens
//! here; the composer is a function of the resolved commit, the build
//! metadata, and the job name.

use crate::domain::build::{BuildInfo, BuildResult};
use crate::domain::commit::CommitInfo;

/// Compose the spoken status sentence for a build
///
/// The salutation deliberately repeats the author name twice — the
/// message is meant to be heard, not read, and the repetition grabs
/// attention. The suffix branches on the build result; any result
/// outside the four known statuses gets a generic "check the logs"
/// notice.
pub fn compose_status(commit: &CommitInfo, build: &BuildInfo, job: &str) -> String {
    let salutation = format!(
        "Message for user {name}! Message for user {name}! \
         Your commit with the commit message - {message},",
        name = commit.author,
        message = commit.summary,
    );

    let suffix = match build.result {
        BuildResult::Success => format!(
            "was succesfully built in job {} build number {}. Good work!",
            job, build.number
        ),
        BuildResult::Failure => format!(
            "has broken the build in job {} build number {}. Please fix it immediately!",
            job, build.number
        ),
        BuildResult::Abort => format!(
            "was aborted in job {} build number {}.",
            job, build.number
        ),
        BuildResult::Unstable => format!(
            "has made the build unstable in job {} build number {}. Please fix it!",
            job, build.number
        ),
        BuildResult::Unknown => format!(
            "did something unexpected to job {} build number {}. Check the logs!",
            job, build.number
        ),
    };

    format!("{salutation} {suffix}")
}
