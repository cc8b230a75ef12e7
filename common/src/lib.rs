//! Shared model for the job finder: the normalized job posting, the search
//! filter over a fetched batch, the saved-jobs store and the application form.

pub mod application;
pub mod job;
pub mod saved;
pub mod search;

pub use application::{Accepted, ApplicationSubmission, Field, ValidationError, submit};
pub use job::{Job, JobId};
pub use saved::{Notice, SavedJobs};
pub use search::{ListingView, filter};
