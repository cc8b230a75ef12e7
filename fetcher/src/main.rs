//! Empllo listing fetcher
//!
//! Fetches the listing feed once and prints the normalized jobs as JSON.
//! Usage: `fetcher [endpoint]`

use std::process::ExitCode;

use fetcher::{fetch_jobs, DEFAULT_ENDPOINT};
use reqwest::blocking::Client;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let endpoint = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    let client = Client::new();
    let jobs = match fetch_jobs(&client, &endpoint) {
        Ok(jobs) => jobs,
        Err(e) => {
            error!(error = ?e, "{}", e);
            return ExitCode::FAILURE;
        }
    };

    for job in &jobs {
        info!(title = %job.title, company = %job.company, "found job");
    }

    match serde_json::to_string_pretty(&jobs) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "failed to serialize jobs");
            ExitCode::FAILURE
        }
    }
}
