use std::fmt;

use scraper::Html;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use uuid::Uuid;

/// Placeholder for display fields the listing feed left out.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Shown on the detail view when a posting carries no description at all.
pub const NO_DESCRIPTION: &str = "No description available.";

/// Client-side identifier of a fetched posting.
///
/// The listing feed has no stable ids, so one is generated per record at
/// fetch time. Ids are unique within a batch and mean nothing across batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A normalized job posting. Never mutated after the fetcher builds it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub work_model: String,
    pub seniority_level: String,
    pub salary: String,
    /// Logo URI, empty when the feed has none.
    pub company_logo: String,
    /// Raw description, may contain markup.
    pub description: String,
}

impl Job {
    /// Description as the detail view shows it: markup removed, cut down to
    /// the first two sentences.
    pub fn detail_description(&self) -> String {
        if self.description.is_empty() {
            return NO_DESCRIPTION.to_string();
        }
        summarize(&strip_markup(&self.description))
    }

    /// Letter drawn in place of the logo when `company_logo` is empty.
    pub fn logo_initial(&self) -> Option<char> {
        self.company.chars().next()
    }
}

/// Renders the salary range from the feed's two numeric bounds.
pub fn format_salary(min: Option<&Number>, max: Option<&Number>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("{} - {}", render_bound(min), render_bound(max)),
        (Some(bound), None) | (None, Some(bound)) => render_bound(bound),
        (None, None) => NOT_SPECIFIED.to_string(),
    }
}

/// Whole-number floats print without a fractional part: `50000.0` reads `50000`.
fn render_bound(bound: &Number) -> String {
    match bound.as_f64() {
        Some(value) if bound.is_f64() && value.fract() == 0.0 && value.abs() < 1e15 => {
            format!("{}", value as i64)
        }
        _ => bound.to_string(),
    }
}

/// Drops every tag and keeps the text content, with entities decoded.
pub fn strip_markup(text: &str) -> String {
    let fragment = Html::parse_fragment(text);
    fragment.root_element().text().collect()
}

/// Keeps the first two `.`-separated sentences and closes with a period.
pub fn summarize(text: &str) -> String {
    let mut summary = text.split('.').take(2).collect::<Vec<_>>().join(".");
    summary.push('.');
    summary
}
