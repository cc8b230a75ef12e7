//! Client-side job application form.
//!
//! Nothing is sent anywhere: a valid submission is acknowledged and dropped,
//! an invalid one reports every failing field at once so the form can show
//! each message next to its input.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use validator::Validate;

use crate::saved::Notice;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Minimum `whyHireMe` length, in UTF-16 code units.
const MIN_WHY_HIRE_ME: usize = 20;

static CONTACT_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^09\d{9}$").unwrap());

/// Form input. Empty fields fail their format rule too; [`submit`] reports
/// them with the field's "required" message instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationSubmission {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(
        email(message = "Invalid email"),
        regex(path = *EMAIL_SHAPE, message = "Email must contain \"@\" and \".\"")
    )]
    pub email: String,

    #[validate(regex(
        path = *CONTACT_NUMBER,
        message = "Contact number must start with \"09\" and be 11 digits long"
    ))]
    pub contact_number: String,

    /// Length is checked by [`submit`] in UTF-16 code units, the way the
    /// mobile form counts characters.
    pub why_hire_me: String,
}

/// Form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    ContactNumber,
    WhyHireMe,
}

impl Field {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "name" => Some(Field::Name),
            "email" => Some(Field::Email),
            "contact_number" | "contactNumber" => Some(Field::ContactNumber),
            "why_hire_me" | "whyHireMe" => Some(Field::WhyHireMe),
            _ => None,
        }
    }

    fn required_message(self) -> &'static str {
        match self {
            Field::Name => "Name is required",
            Field::Email => "Email is required",
            Field::ContactNumber => "Contact number is required",
            Field::WhyHireMe => "This field is required",
        }
    }

    fn value(self, input: &ApplicationSubmission) -> &str {
        match self {
            Field::Name => &input.name,
            Field::Email => &input.email,
            Field::ContactNumber => &input.contact_number,
            Field::WhyHireMe => &input.why_hire_me,
        }
    }
}

/// A submission that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Accepted {
    pub notice: Notice,
}

impl Accepted {
    pub const NOTICE: Notice = Notice {
        title: "Application Submitted",
        message: "Thank you for applying! We will review your application and get back to you soon.",
    };
}

/// One message per invalid field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{} application field(s) failed validation", .errors.len())]
pub struct ValidationError {
    errors: BTreeMap<Field, String>,
}

impl ValidationError {
    pub fn errors(&self) -> &BTreeMap<Field, String> {
        &self.errors
    }

    pub fn message(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    fn from_validator(input: &ApplicationSubmission, report: &validator::ValidationErrors) -> Self {
        let mut errors = BTreeMap::new();
        for (key, failures) in report.field_errors() {
            let Some(field) = Field::from_key(key.as_ref()) else {
                continue;
            };
            let message = if field.value(input).is_empty() {
                field.required_message().to_string()
            } else {
                failures
                    .iter()
                    .find_map(|failure| failure.message.as_ref())
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("Invalid {:?}", field))
            };
            errors.insert(field, message);
        }
        Self { errors }
    }
}

/// Validates `input` and accepts it. The input is discarded either way.
pub fn submit(input: &ApplicationSubmission) -> Result<Accepted, ValidationError> {
    let mut report = input.validate().err().unwrap_or_else(validator::ValidationErrors::new);

    if input.why_hire_me.encode_utf16().count() < MIN_WHY_HIRE_ME {
        let mut too_short = validator::ValidationError::new("length");
        too_short.message = Some(Cow::Borrowed(
            "Please provide a detailed response (at least 20 characters)",
        ));
        report.add("why_hire_me", too_short);
    }

    if report.errors().is_empty() {
        info!("application accepted");
        return Ok(Accepted {
            notice: Accepted::NOTICE,
        });
    }

    let error = ValidationError::from_validator(input, &report);
    debug!(fields = ?error.errors.keys().collect::<Vec<_>>(), "application rejected");
    Err(error)
}
