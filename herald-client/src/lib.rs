//! Herald HTTP Clients
//!
//! Type-safe HTTP clients for the three external services the Herald
//! pipeline consumes: the CI server, the repository-hosting API, and
//! the speech-synthesis service, plus the sequential pipeline that
//! chains them.
//!
//! # Example
//!
//! ```no_run
//! use herald_client::pipeline::{self, PipelineConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PipelineConfig {
//!         ci_url: "http://localhost:8080".to_string(),
//!         job: "widgets-main".to_string(),
//!         hosting_url: None,
//!         output_dir: None,
//!         voice: "Joanna".to_string(),
//!         account: "notifier".to_string(),
//!         credentials_path: None,
//!     };
//!
//!     let audio = pipeline::run(&config).await?;
//!     println!("Wrote {}", audio.display());
//!     Ok(())
//! }
//! ```

mod ci;
mod credentials;
pub mod error;
mod hosting;
pub mod pipeline;
mod speech;

// Re-export commonly used types
pub use ci::CiClient;
pub use credentials::{CREDENTIALS_ENV, Credentials};
pub use error::{ClientError, Result};
pub use hosting::HostingClient;
pub use speech::{AUDIO_FILENAME, SpeechClient};

use serde::de::DeserializeOwned;

/// Handle an API response and deserialize JSON
///
/// Checks the status code and returns an appropriate error if the
/// request failed, or deserializes the response body if successful.
pub(crate) async fn handle_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::api_error(status.as_u16(), error_text));
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
}
