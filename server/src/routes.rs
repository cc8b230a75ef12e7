//! HTTP surface over one session: listing and search, job detail, saved
//! jobs and the application form.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use common::{Accepted, ApplicationSubmission, Job, JobId, Notice, submit};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::state::SharedState;

/// A job as the list shows it, with its bookmark state.
#[derive(Debug, Serialize)]
struct JobCard {
    #[serde(flatten)]
    job: Job,
    saved: bool,
}

/// Listing screen: fetch status plus the filtered jobs.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListingResponse {
    query: String,
    status: &'static str,
    error: Option<String>,
    message: Option<&'static str>,
    total_results: usize,
    jobs: Vec<JobCard>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetailResponse {
    job: Job,
    saved: bool,
    description: String,
    logo_initial: Option<char>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SavedResponse {
    total_results: usize,
    jobs: Vec<Job>,
    message: Option<&'static str>,
}

/// Query parameters for the listing endpoint
#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/jobs", get(list_jobs_handler))
        .route("/jobs/refresh", post(refresh_handler))
        .route("/jobs/{id}", get(job_detail_handler))
        .route("/jobs/{id}/apply", post(apply_handler))
        .route("/saved", get(saved_jobs_handler))
        .route("/saved/{id}", post(save_job_handler).delete(remove_job_handler))
        .with_state(state)
}

/// Handler for GET / (root)
async fn root_handler() -> &'static str {
    "Job Finder API\n\nEndpoints:\n  GET    /jobs?q=<text>      - List jobs, filtered by title, company or location\n  POST   /jobs/refresh       - Fetch the listing again\n  GET    /jobs/{id}          - Job detail\n  POST   /jobs/{id}/apply    - Submit an application\n  GET    /saved              - Saved jobs\n  POST   /saved/{id}         - Save a job\n  DELETE /saved/{id}         - Remove a saved job\n"
}

/// Handler for GET /jobs?q=<text>
async fn list_jobs_handler(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Json<ListingResponse> {
    let query = params.q.unwrap_or_default();
    let listing = state.listing.read().await;
    let saved = state.saved.read().await;

    let status = if listing.is_loading() {
        "loading"
    } else if listing.error().is_some() {
        "error"
    } else {
        "ready"
    };

    let jobs: Vec<JobCard> = listing
        .visible(&query)
        .into_iter()
        .map(|job| JobCard {
            saved: saved.is_saved(&job),
            job,
        })
        .collect();

    Json(ListingResponse {
        status,
        error: listing.error().map(str::to_string),
        message: listing.empty_message(&query),
        total_results: jobs.len(),
        jobs,
        query,
    })
}

/// Handler for POST /jobs/refresh
async fn refresh_handler(State(state): State<SharedState>) -> StatusCode {
    tokio::spawn(async move { state.refresh().await });
    StatusCode::ACCEPTED
}

/// Handler for GET /jobs/{id}
async fn job_detail_handler(
    State(state): State<SharedState>,
    Path(id): Path<JobId>,
) -> Result<Json<DetailResponse>, ApiError> {
    let job = state.find_job(&id).await.ok_or(ApiError::JobNotFound(id))?;
    let saved = state.saved.read().await.is_saved(&job);

    Ok(Json(DetailResponse {
        saved,
        description: job.detail_description(),
        logo_initial: job.logo_initial(),
        job,
    }))
}

/// Handler for POST /jobs/{id}/apply
async fn apply_handler(
    State(state): State<SharedState>,
    Path(id): Path<JobId>,
    Json(input): Json<ApplicationSubmission>,
) -> Result<Json<Accepted>, ApiError> {
    let job = state.find_job(&id).await.ok_or(ApiError::JobNotFound(id))?;
    let accepted = submit(&input)?;
    info!(job_id = %job.id, title = %job.title, "application submitted");
    Ok(Json(accepted))
}

/// Handler for GET /saved
async fn saved_jobs_handler(State(state): State<SharedState>) -> Json<SavedResponse> {
    let saved = state.saved.read().await;
    Json(SavedResponse {
        total_results: saved.len(),
        jobs: saved.jobs().to_vec(),
        message: saved.is_empty().then_some("No jobs saved yet."),
    })
}

/// Handler for POST /saved/{id}
async fn save_job_handler(
    State(state): State<SharedState>,
    Path(id): Path<JobId>,
) -> Result<Json<Notice>, ApiError> {
    let job = state.find_job(&id).await.ok_or(ApiError::JobNotFound(id))?;
    Ok(Json(state.saved.write().await.add(job)))
}

/// Handler for DELETE /saved/{id}
async fn remove_job_handler(
    State(state): State<SharedState>,
    Path(id): Path<JobId>,
) -> Json<Notice> {
    Json(state.saved.write().await.remove_id(&id))
}
