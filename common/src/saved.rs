//! Jobs the user bookmarked during the current session.

use serde::Serialize;
use tracing::info;

use crate::job::{Job, JobId};

/// Acknowledgment shown to the user after a store mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: &'static str,
    pub message: &'static str,
}

impl Notice {
    pub const SAVED: Notice = Notice {
        title: "Saved!",
        message: "Job has been saved successfully.",
    };

    pub const REMOVED: Notice = Notice {
        title: "Removed",
        message: "Job has been removed from your saved jobs.",
    };
}

/// Insertion-ordered set of saved jobs, unique by [`JobId`].
///
/// Owned by whoever drives the session and handed to consumers explicitly.
/// Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct SavedJobs {
    jobs: Vec<Job>,
}

impl SavedJobs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `job` unless a job with the same id is already saved.
    pub fn add(&mut self, job: Job) -> Notice {
        if self.is_saved(&job) {
            info!(job_id = %job.id, "job already saved");
        } else {
            info!(job_id = %job.id, title = %job.title, "job saved");
            self.jobs.push(job);
        }
        Notice::SAVED
    }

    /// Removes every entry sharing `job`'s id. Absent jobs are a no-op.
    pub fn remove(&mut self, job: &Job) -> Notice {
        self.remove_id(&job.id)
    }

    pub fn remove_id(&mut self, id: &JobId) -> Notice {
        let before = self.jobs.len();
        self.jobs.retain(|saved| saved.id != *id);
        info!(job_id = %id, removed = before - self.jobs.len(), "job removed");
        Notice::REMOVED
    }

    /// Bookmark button: unsave when saved, save otherwise.
    pub fn toggle(&mut self, job: Job) -> Notice {
        if self.is_saved(&job) {
            self.remove(&job)
        } else {
            self.add(job)
        }
    }

    pub fn is_saved(&self, job: &Job) -> bool {
        self.contains(&job.id)
    }

    pub fn contains(&self, id: &JobId) -> bool {
        self.jobs.iter().any(|saved| saved.id == *id)
    }

    pub fn get(&self, id: &JobId) -> Option<&Job> {
        self.jobs.iter().find(|saved| saved.id == *id)
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str) -> Job {
        Job {
            id: JobId::generate(),
            title: title.to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            job_type: "Full-time".to_string(),
            work_model: "Remote".to_string(),
            seniority_level: "Mid".to_string(),
            salary: "50000 - 70000".to_string(),
            company_logo: String::new(),
            description: String::new(),
        }
    }

    #[test]
    fn test_add_then_remove() {
        let mut saved = SavedJobs::new();
        let engineer = job("Engineer");

        assert_eq!(saved.add(engineer.clone()), Notice::SAVED);
        assert!(saved.is_saved(&engineer));

        assert_eq!(saved.remove(&engineer), Notice::REMOVED);
        assert!(!saved.is_saved(&engineer));
        assert!(saved.is_empty());
    }

    #[test]
    fn test_add_is_idempotent_by_id() {
        let mut saved = SavedJobs::new();
        let engineer = job("Engineer");
        let mut renamed = engineer.clone();
        renamed.title = "Staff Engineer".to_string();

        saved.add(engineer.clone());
        saved.add(renamed);
        assert_eq!(saved.len(), 1);
        assert_eq!(saved.jobs()[0].title, "Engineer");
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut saved = SavedJobs::new();
        let first = job("First");
        let second = job("Second");
        saved.add(first.clone());

        saved.remove(&second);
        assert_eq!(saved.jobs(), &[first]);
    }

    #[test]
    fn test_remove_matches_id_not_value() {
        let mut saved = SavedJobs::new();
        let engineer = job("Engineer");
        saved.add(engineer.clone());

        let mut stale = engineer.clone();
        stale.salary = "changed".to_string();
        saved.remove(&stale);
        assert!(!saved.is_saved(&engineer));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut saved = SavedJobs::new();
        let jobs: Vec<Job> = ["A", "B", "C"].into_iter().map(job).collect();
        for j in &jobs {
            saved.add(j.clone());
        }
        saved.remove(&jobs[1]);

        let titles: Vec<&str> = saved.jobs().iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
        assert_eq!(saved.get(&jobs[2].id), Some(&jobs[2]));
        assert_eq!(saved.get(&jobs[1].id), None);
    }

    #[test]
    fn test_toggle() {
        let mut saved = SavedJobs::new();
        let engineer = job("Engineer");

        assert_eq!(saved.toggle(engineer.clone()), Notice::SAVED);
        assert!(saved.is_saved(&engineer));
        assert_eq!(saved.toggle(engineer.clone()), Notice::REMOVED);
        assert!(!saved.is_saved(&engineer));
    }
}
