//! Client-side search over a fetched batch.
//!
//! Matching is plain case-insensitive substring containment on title,
//! company and location. There is no ranking: results keep the order of the
//! source list.

use crate::job::Job;

/// Shown when a loaded listing has nothing left after filtering.
pub const NO_MATCHES: &str = "No jobs match your search.";

/// Returns the jobs whose title, company or location contains `query`,
/// ignoring case. An empty query returns the whole list. The query is not
/// trimmed.
pub fn filter(jobs: &[Job], query: &str) -> Vec<Job> {
    if query.is_empty() {
        return jobs.to_vec();
    }

    let needle = query.to_lowercase();
    jobs.iter()
        .filter(|job| matches(job, &needle))
        .cloned()
        .collect()
}

fn matches(job: &Job, needle: &str) -> bool {
    [&job.title, &job.company, &job.location]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// State of the listing screen across its single fetch.
#[derive(Debug, Clone, Default)]
pub enum ListingView {
    #[default]
    Loading,
    Ready(Vec<Job>),
    /// Displayable fetch failure. The list stays empty.
    Failed(String),
}

impl ListingView {
    /// Jobs currently loaded, empty unless the fetch succeeded.
    pub fn jobs(&self) -> &[Job] {
        match self {
            ListingView::Ready(jobs) => jobs,
            ListingView::Loading | ListingView::Failed(_) => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ListingView::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ListingView::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// The filtered view for `query`.
    pub fn visible(&self, query: &str) -> Vec<Job> {
        filter(self.jobs(), query)
    }

    /// Message for an empty result. Stays quiet while loading.
    pub fn empty_message(&self, query: &str) -> Option<&'static str> {
        if self.is_loading() || !self.visible(query).is_empty() {
            return None;
        }
        Some(NO_MATCHES)
    }
}
