//! Speech-synthesis client
//!
//! Sends composed status text to the speech service and persists the
//! returned audio stream as a local file.

use std::path::{Path, PathBuf};

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use crate::credentials::Credentials;
use crate::error::{ClientError, Result};

/// Fixed basename of the rendered audio file
pub const AUDIO_FILENAME: &str = "message.mp3";

/// Synthesis request body
#[derive(Debug, Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
    voice: &'a str,
    format: &'a str,
}

/// HTTP client for the speech-synthesis service
#[derive(Debug, Clone)]
pub struct SpeechClient {
    /// Endpoint of the speech service
    endpoint: String,
    /// Bearer token from the credential profile
    api_key: String,
    /// HTTP client instance
    client: Client,
}

impl SpeechClient {
    /// Create a speech client from a credential profile
    pub fn new(credentials: Credentials) -> Self {
        Self {
            endpoint: credentials.endpoint.trim_end_matches('/').to_string(),
            api_key: credentials.api_key,
            client: Client::new(),
        }
    }

    /// Get the endpoint of the speech service
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Synthesize text to speech
    ///
    /// The response stream is drained in full before returning; the
    /// service throttles on the number of concurrently open streams,
    /// so the connection must never be left half-read.
    ///
    /// # Arguments
    /// * `text` - The status text to speak
    /// * `voice` - The synthesis voice identifier
    ///
    /// # Returns
    /// The MP3 audio bytes; an empty payload is an error, never an
    /// empty success.
    pub async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>> {
        let url = format!("{}/v1/synthesize", self.endpoint);
        debug!(voice, chars = text.len(), "requesting speech synthesis");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&SynthesizeRequest {
                text,
                voice,
                format: "mp3",
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(ClientError::NoAudio);
        }

        debug!(bytes = audio.len(), "received synthesized audio");
        Ok(audio.to_vec())
    }

    /// Synthesize text and write the audio into a directory
    ///
    /// Writes [`AUDIO_FILENAME`] into `dir`, overwriting any existing
    /// file of that name.
    ///
    /// # Arguments
    /// * `text` - The status text to speak
    /// * `voice` - The synthesis voice identifier
    /// * `dir` - Target directory for the audio file
    ///
    /// # Returns
    /// The path of the written file
    pub async fn render_to_file(&self, text: &str, voice: &str, dir: &Path) -> Result<PathBuf> {
        let audio = self.synthesize(text, voice).await?;

        let path = dir.join(AUDIO_FILENAME);
        info!(path = %path.display(), "writing synthesized audio");
        tokio::fs::write(&path, &audio).await?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(endpoint: &str) -> Credentials {
        Credentials {
            endpoint: endpoint.to_string(),
            api_key: "secret".to_string(),
        }
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = SpeechClient::new(credentials("https://tts.example.com/"));
        assert_eq!(client.endpoint(), "https://tts.example.com");
    }

    #[test]
    fn request_body_serializes_expected_fields() {
        let body = serde_json::to_value(SynthesizeRequest {
            text: "hello",
            voice: "Joanna",
            format: "mp3",
        })
        .unwrap();

        assert_eq!(body["text"], "hello");
        assert_eq!(body["voice"], "Joanna");
        assert_eq!(body["format"], "mp3");
    }
}
