//! Job Finder Server
//!
//! Fetches the job listing once at startup and serves one user session over
//! HTTP: search, job detail, saved jobs and applications. All state lives in
//! memory.

mod config;
mod error;
mod routes;
mod state;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = match Config::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    info!(endpoint = %config.endpoint, "starting job finder server");

    let state = Arc::new(AppState::new(config.endpoint.clone()));
    tokio::spawn({
        let state = state.clone();
        async move { state.refresh().await }
    });

    let app = routes::router(state);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(addr = %config.bind_addr, "server running, try: curl 'http://{}/jobs?q=developer'", config.bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
