//! Herald CLI
//!
//! Looks up the latest completed build of a CI job, resolves its commit,
//! and speaks the result into an audio file.

mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::*;
use tracing::{error, info};

use config::Config;
use herald_client::pipeline;

#[derive(Parser)]
#[command(name = "herald")]
#[command(about = "Speaks the latest CI build status for a job", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    debug: bool,

    /// CI server URL
    #[arg(
        short = 'u',
        long,
        env = "HERALD_CI_URL",
        default_value = config::DEFAULT_CI_URL
    )]
    url: String,

    /// Job to inspect
    #[arg(short, long, env = "HERALD_JOB", default_value = config::DEFAULT_JOB)]
    job: String,

    /// Directory for the audio file (system temp dir when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Voice to synthesize with
    #[arg(short, long, default_value = config::DEFAULT_VOICE)]
    voice: String,

    /// Credential profile for the speech service
    #[arg(short, long)]
    account: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.debug {
            "debug".to_string()
        } else {
            "info".to_string()
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(cli.debug)
        .init();

    let config = Config {
        debug: cli.debug,
        ci_url: cli.url,
        job: cli.job,
        output: cli.output,
        voice: cli.voice,
        account: cli.account,
    };
    info!(url = %config.ci_url, job = %config.job, "starting herald");

    match pipeline::run(&config.pipeline_config()).await {
        Ok(path) => {
            println!(
                "{} {}",
                "✓".green(),
                format!("Saved build status audio to {}", path.display()).bold()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(stage = e.stage(), "{e}");
            ExitCode::FAILURE
        }
    }
}
