//! End-to-end pipeline tests against mocked CI, hosting, and speech
//! services.

use std::path::PathBuf;

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use herald_client::pipeline::{self, PipelineConfig, PipelineError};
use herald_client::AUDIO_FILENAME;
use herald_core::domain::build::{BuildInfo, BuildResult};
use herald_core::domain::commit::CommitInfo;
use herald_core::message::compose_status;

const FAKE_AUDIO: &[u8] = b"ID3\x03fake-mp3-payload";

/// Write a credentials file whose `notifier` profile points at the
/// mock speech endpoint.
fn write_credentials(dir: &tempfile::TempDir, endpoint: &str) -> PathBuf {
    let path = dir.path().join("credentials.toml");
    let contents = format!(
        "[profiles.notifier]\nendpoint = \"{}\"\napi_key = \"secret\"\n",
        endpoint
    );
    std::fs::write(&path, contents).unwrap();
    path
}

fn config(server: &ServerGuard, dirs: &TestDirs) -> PipelineConfig {
    PipelineConfig {
        ci_url: server.url(),
        job: "demo".to_string(),
        hosting_url: Some(server.url()),
        output_dir: Some(dirs.output.path().to_path_buf()),
        voice: "Joanna".to_string(),
        account: "notifier".to_string(),
        credentials_path: Some(dirs.credentials_path.clone()),
    }
}

struct TestDirs {
    output: tempfile::TempDir,
    _credentials: tempfile::TempDir,
    credentials_path: PathBuf,
}

fn test_dirs(endpoint: &str) -> TestDirs {
    let output = tempfile::tempdir().unwrap();
    let credentials = tempfile::tempdir().unwrap();
    let credentials_path = write_credentials(&credentials, endpoint);
    TestDirs {
        output,
        _credentials: credentials,
        credentials_path,
    }
}

/// Mount the CI mocks for a successful `demo` build number 7.
async fn mock_ci_success(server: &mut ServerGuard) {
    server
        .mock("GET", "/job/demo/api/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"lastCompletedBuild": {"number": 7}}).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/job/demo/7/api/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "result": "SUCCESS",
                "actions": [
                    {"causes": [{"shortDescription": "Started by timer"}]},
                    {
                        "remoteUrls": ["https://github.com/acme/widgets.git"],
                        "lastBuiltRevision": {"SHA1": "abc123"}
                    }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;
}

#[tokio::test]
async fn pipeline_renders_success_message_to_audio_file() {
    let mut server = Server::new_async().await;
    mock_ci_success(&mut server).await;

    server
        .mock("GET", "/repos/acme/widgets/commits/abc123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "sha": "abc123",
                "commit": {
                    "author": {"name": "Bob", "email": "bob@acme.dev", "date": "2024-05-01T10:00:00Z"},
                    "message": "Add feature\nmore text"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    // The exact text the speech service must receive
    let expected_text = compose_status(
        &CommitInfo {
            author: "Bob".to_string(),
            summary: "Add feature".to_string(),
        },
        &BuildInfo {
            repo_url: "https://github.com/acme/widgets.git".to_string(),
            sha: "abc123".to_string(),
            number: 7,
            result: BuildResult::Success,
        },
        "demo",
    );
    assert_eq!(expected_text.matches("Bob").count(), 2);
    assert!(expected_text.contains("Add feature"));
    assert!(expected_text.contains("succesfully built"));
    assert!(expected_text.contains("demo"));
    assert!(expected_text.contains("7"));

    let speech_mock = server
        .mock("POST", "/v1/synthesize")
        .match_header("authorization", "Bearer secret")
        .match_body(Matcher::PartialJson(json!({
            "text": expected_text,
            "voice": "Joanna",
            "format": "mp3"
        })))
        .with_status(200)
        .with_header("content-type", "audio/mpeg")
        .with_body(FAKE_AUDIO.to_vec())
        .create_async()
        .await;

    let dirs = test_dirs(&server.url());
    let path = pipeline::run(&config(&server, &dirs)).await.unwrap();

    speech_mock.assert_async().await;
    assert!(path.ends_with(AUDIO_FILENAME));
    assert_eq!(std::fs::read(&path).unwrap(), FAKE_AUDIO);
}

#[tokio::test]
async fn missing_revision_action_fails_build_lookup() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/job/demo/api/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"lastCompletedBuild": {"number": 7}}).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/job/demo/7/api/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "result": "SUCCESS",
                "actions": [{"causes": [{"shortDescription": "Started by timer"}]}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let dirs = test_dirs(&server.url());
    let err = pipeline::run(&config(&server, &dirs)).await.unwrap_err();

    assert!(matches!(err, PipelineError::BuildLookup(_)));
}

#[tokio::test]
async fn job_without_completed_build_fails_build_lookup() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/job/demo/api/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"lastCompletedBuild": null}).to_string())
        .create_async()
        .await;

    let dirs = test_dirs(&server.url());
    let err = pipeline::run(&config(&server, &dirs)).await.unwrap_err();

    assert!(matches!(err, PipelineError::BuildLookup(_)));
}

#[tokio::test]
async fn unknown_job_fails_build_lookup() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/job/demo/api/json")
        .with_status(404)
        .with_body("no such job")
        .create_async()
        .await;

    let dirs = test_dirs(&server.url());
    let err = pipeline::run(&config(&server, &dirs)).await.unwrap_err();

    assert!(matches!(err, PipelineError::BuildLookup(_)));
}

#[tokio::test]
async fn hosting_api_error_fails_commit_resolution() {
    let mut server = Server::new_async().await;
    mock_ci_success(&mut server).await;
    server
        .mock("GET", "/repos/acme/widgets/commits/abc123")
        .with_status(404)
        .with_body("commit not found")
        .create_async()
        .await;

    let dirs = test_dirs(&server.url());
    let err = pipeline::run(&config(&server, &dirs)).await.unwrap_err();

    assert!(matches!(err, PipelineError::CommitResolution(_)));
}

#[tokio::test]
async fn empty_audio_payload_fails_synthesis() {
    let mut server = Server::new_async().await;
    mock_ci_success(&mut server).await;
    server
        .mock("GET", "/repos/acme/widgets/commits/abc123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "sha": "abc123",
                "commit": {
                    "author": {"name": "Bob"},
                    "message": "Add feature"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("POST", "/v1/synthesize")
        .with_status(200)
        .with_header("content-type", "audio/mpeg")
        .with_body("")
        .create_async()
        .await;

    let dirs = test_dirs(&server.url());
    let err = pipeline::run(&config(&server, &dirs)).await.unwrap_err();

    assert!(matches!(err, PipelineError::Synthesis(_)));
    // No file must be written on a synthesis failure
    assert!(!dirs.output.path().join(AUDIO_FILENAME).exists());
}

#[tokio::test]
async fn unknown_credential_profile_fails_synthesis() {
    let mut server = Server::new_async().await;
    mock_ci_success(&mut server).await;
    server
        .mock("GET", "/repos/acme/widgets/commits/abc123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "sha": "abc123",
                "commit": {
                    "author": {"name": "Bob"},
                    "message": "Add feature"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let dirs = test_dirs(&server.url());
    let mut cfg = config(&server, &dirs);
    cfg.account = "production".to_string();
    let err = pipeline::run(&cfg).await.unwrap_err();

    assert!(matches!(err, PipelineError::Synthesis(_)));
}
