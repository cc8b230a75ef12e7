//! Job listing fetcher
//!
//! Downloads the empllo listing feed and normalizes every record into a
//! [`Job`], filling placeholders for whatever the feed left out.

use common::job::{format_salary, NOT_SPECIFIED};
use common::{Job, JobId};
use reqwest::blocking::Client;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Feed the listing screen reads from.
pub const DEFAULT_ENDPOINT: &str = "https://empllo.com/api/v1";

const DEFAULT_WORK_MODEL: &str = "Remote";
const MISSING_DESCRIPTION: &str = "No description available";

/// Why a fetch produced no jobs. Both variants display as a message for the
/// listing screen. Neither is retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Error fetching jobs: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Jobs data is not in the expected format.")]
    Format { reason: String },
}

impl FetchError {
    fn format(reason: impl Into<String>) -> Self {
        FetchError::Format {
            reason: reason.into(),
        }
    }
}

/// One record of the feed's `jobs` array. Every field is optional, and a
/// field of the wrong JSON type reads as missing.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawListing {
    #[serde(deserialize_with = "text")]
    title: Option<String>,
    #[serde(deserialize_with = "text")]
    company_name: Option<String>,
    min_salary: Option<Value>,
    max_salary: Option<Value>,
    #[serde(deserialize_with = "text")]
    company_logo: Option<String>,
    #[serde(deserialize_with = "text_list")]
    locations: Option<Vec<String>>,
    #[serde(deserialize_with = "text")]
    job_type: Option<String>,
    #[serde(deserialize_with = "text")]
    work_model: Option<String>,
    #[serde(deserialize_with = "text")]
    description: Option<String>,
    #[serde(deserialize_with = "text")]
    seniority_level: Option<String>,
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Keeps the string entries of an array and drops the rest.
fn text_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<String>>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

/// Issues the single GET against `endpoint` and maps the response.
pub fn fetch_jobs(client: &Client, endpoint: &str) -> Result<Vec<Job>, FetchError> {
    info!(endpoint, "fetching jobs");

    let body = client.get(endpoint).send()?.error_for_status()?.text()?;
    debug!(bytes = body.len(), "fetched listing feed");

    let jobs = parse_response(&body)?;
    info!(count = jobs.len(), "fetched jobs");
    Ok(jobs)
}

/// Maps a feed document into jobs, each with a freshly generated id.
///
/// The document must be a JSON object holding a `jobs` array. Records that
/// are not objects are skipped.
pub fn parse_response(body: &str) -> Result<Vec<Job>, FetchError> {
    let document: Value =
        serde_json::from_str(body).map_err(|e| FetchError::format(e.to_string()))?;

    let records = document
        .get("jobs")
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::format("`jobs` array missing"))?;

    let jobs = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            if !record.is_object() {
                warn!(index, "skipping listing that is not an object");
                return None;
            }
            match RawListing::deserialize(record) {
                Ok(raw) => Some(normalize(raw)),
                Err(e) => {
                    warn!(index, error = %e, "skipping malformed listing");
                    None
                }
            }
        })
        .collect();

    Ok(jobs)
}

fn normalize(raw: RawListing) -> Job {
    let location = raw
        .locations
        .map(|locations| locations.join(", "))
        .and_then(present);

    Job {
        id: JobId::generate(),
        title: raw.title.and_then(present).unwrap_or_default(),
        company: raw.company_name.and_then(present).unwrap_or_default(),
        location: location.unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        job_type: or_placeholder(raw.job_type, NOT_SPECIFIED),
        work_model: or_placeholder(raw.work_model, DEFAULT_WORK_MODEL),
        seniority_level: or_placeholder(raw.seniority_level, NOT_SPECIFIED),
        salary: format_salary(
            salary_bound(raw.min_salary.as_ref()).as_ref(),
            salary_bound(raw.max_salary.as_ref()).as_ref(),
        ),
        company_logo: raw.company_logo.and_then(present).unwrap_or_default(),
        description: or_placeholder(raw.description, MISSING_DESCRIPTION),
    }
}

/// Empty strings count as missing.
fn present(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

fn or_placeholder(value: Option<String>, placeholder: &str) -> String {
    value
        .and_then(present)
        .unwrap_or_else(|| placeholder.to_string())
}

/// Bounds arrive as numbers, occasionally as numeric strings.
fn salary_bound(value: Option<&Value>) -> Option<Number> {
    match value? {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) => serde_json::from_str::<Number>(s.trim()).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_parse_sample_listing() {
        let body = r#"{ "jobs": [{ "title": "Engineer", "companyName": "Acme",
            "minSalary": 50000, "maxSalary": 70000, "locations": ["Remote"] }] }"#;

        let jobs = parse_response(body).unwrap();
        assert_eq!(jobs.len(), 1);

        let job = &jobs[0];
        assert_eq!(job.title, "Engineer");
        assert_eq!(job.company, "Acme");
        assert_eq!(job.salary, "50000 - 70000");
        assert_eq!(job.location, "Remote");
        assert!(!job.id.to_string().is_empty());
    }

    #[test]
    fn test_missing_fields_get_placeholders() {
        let jobs = parse_response(r#"{ "jobs": [{}] }"#).unwrap();
        let job = &jobs[0];

        assert_eq!(job.title, "");
        assert_eq!(job.company, "");
        assert_eq!(job.company_logo, "");
        assert_eq!(job.location, "Not specified");
        assert_eq!(job.job_type, "Not specified");
        assert_eq!(job.seniority_level, "Not specified");
        assert_eq!(job.work_model, "Remote");
        assert_eq!(job.description, "No description available");
        assert_eq!(job.salary, "Not specified");
    }

    #[test]
    fn test_empty_strings_and_locations() {
        let body = r#"{ "jobs": [{ "title": "", "workModel": "", "locations": [],
            "minSalary": "60000", "maxSalary": null }, { "locations": ["Manila", "Cebu"] }] }"#;

        let jobs = parse_response(body).unwrap();
        assert_eq!(jobs[0].title, "");
        assert_eq!(jobs[0].work_model, "Remote");
        assert_eq!(jobs[0].location, "Not specified");
        assert_eq!(jobs[0].salary, "60000");
        assert_eq!(jobs[1].location, "Manila, Cebu");
    }

    #[test]
    fn test_ids_unique_within_batch() {
        let body = r#"{ "jobs": [{ "title": "A" }, { "title": "A" }, { "title": "A" }] }"#;
        let jobs = parse_response(body).unwrap();
        let ids: HashSet<_> = jobs.iter().map(|job| job.id).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_non_object_records_are_skipped() {
        let body = r#"{ "jobs": [42, "text", [], { "title": "Kept" }] }"#;
        let jobs = parse_response(body).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Kept");
    }

    #[test]
    fn test_mistyped_fields_read_as_missing() {
        let body = r#"{ "jobs": [
            { "title": "A", "locations": ["Manila", null] },
            { "title": 7, "companyName": ["Acme"], "locations": "Remote", "workModel": false }
        ] }"#;
        let jobs = parse_response(body).unwrap();
        assert_eq!(jobs.len(), 2);

        assert_eq!(jobs[0].title, "A");
        assert_eq!(jobs[0].location, "Manila");

        assert_eq!(jobs[1].title, "");
        assert_eq!(jobs[1].company, "");
        assert_eq!(jobs[1].location, "Not specified");
        assert_eq!(jobs[1].work_model, "Remote");
    }

    #[test]
    fn test_whole_float_salary_bounds() {
        let body = r#"{ "jobs": [{ "minSalary": 50000.0, "maxSalary": 7e4 }] }"#;
        let jobs = parse_response(body).unwrap();
        assert_eq!(jobs[0].salary, "50000 - 70000");
    }

    #[test]
    fn test_missing_jobs_array_is_format_error() {
        for body in [r#"{ "listings": [] }"#, r#"{ "jobs": {} }"#, "[]", "not json"] {
            let err = parse_response(body).unwrap_err();
            assert!(matches!(err, FetchError::Format { .. }), "{body}");
            assert_eq!(err.to_string(), "Jobs data is not in the expected format.");
        }
    }

    #[test]
    fn test_unreachable_endpoint_is_transport_error() {
        let client = Client::new();
        let err = fetch_jobs(&client, "http://127.0.0.1:1/api/v1").unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        assert!(err.to_string().starts_with("Error fetching jobs: "));
    }
}
