//! Session state shared by the handlers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use common::{Job, JobId, ListingView, SavedJobs};
use fetcher::fetch_jobs;
use reqwest::blocking::Client;
use tokio::sync::RwLock;
use tracing::{error, info};

pub type SharedState = Arc<AppState>;

/// Listing and saved jobs of one user session.
///
/// Built once in `main` and handed to the router. Nothing outlives the process.
pub struct AppState {
    pub listing: RwLock<ListingView>,
    pub saved: RwLock<SavedJobs>,
    endpoint: String,
    /// Bumped per fetch so only the newest one lands. Read and written only
    /// while holding the `listing` write guard.
    generation: AtomicU64,
}

impl AppState {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_listing(endpoint, ListingView::Loading)
    }

    pub fn with_listing(endpoint: impl Into<String>, listing: ListingView) -> Self {
        Self {
            listing: RwLock::new(listing),
            saved: RwLock::new(SavedJobs::new()),
            endpoint: endpoint.into(),
            generation: AtomicU64::new(0),
        }
    }

    /// Fetches the listing again and replaces it with the outcome. The list
    /// shows as loading until the fetch completes.
    pub async fn refresh(&self) {
        let generation = {
            let mut listing = self.listing.write().await;
            *listing = ListingView::Loading;
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        let endpoint = self.endpoint.clone();
        // The blocking client has its own runtime and must stay off ours.
        let outcome = tokio::task::spawn_blocking(move || {
            let client = Client::new();
            fetch_jobs(&client, &endpoint)
        })
        .await;

        let view = match outcome {
            Ok(Ok(jobs)) => {
                info!(count = jobs.len(), "listing loaded");
                ListingView::Ready(jobs)
            }
            Ok(Err(e)) => {
                error!(error = ?e, "listing fetch failed");
                ListingView::Failed(e.to_string())
            }
            Err(e) => {
                error!(error = %e, "listing fetch task failed");
                ListingView::Failed(format!("Error fetching jobs: {}", e))
            }
        };

        self.land(generation, view).await;
    }

    /// Writes a fetch outcome unless a newer fetch started since. Returns
    /// whether it was written.
    async fn land(&self, generation: u64, view: ListingView) -> bool {
        let mut listing = self.listing.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            info!(generation, "discarding superseded fetch");
            return false;
        }
        *listing = view;
        true
    }

    /// Looks a job up in the current listing, then among saved jobs.
    pub async fn find_job(&self, id: &JobId) -> Option<Job> {
        let listing = self.listing.read().await;
        if let Some(job) = listing.jobs().iter().find(|job| job.id == *id) {
            return Some(job.clone());
        }
        drop(listing);

        self.saved.read().await.get(id).cloned()
    }
}
