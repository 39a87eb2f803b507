//! Course request domain types
//!
//! A `CourseRequest` is the canonical structured form of an educator's course
//! request. Raw form values arrive as a [`CourseRequestDraft`] and become a
//! `CourseRequest` only once validation passes; mid-conversation edits arrive
//! as a [`CourseRequestUpdate`] and are merged via [`CourseRequest::apply`].

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum character length for course titles
pub const MIN_TITLE_LEN: usize = 5;

/// Minimum character length for course descriptions
pub const MIN_DESCRIPTION_LEN: usize = 15;

/// Minimum character length for course expectations
pub const MIN_EXPECTATIONS_LEN: usize = 10;

/// A single violated field constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Field the constraint applies to
    pub field: &'static str,

    /// Human-readable message, suitable for rendering directly in a form
    pub message: String,
}

impl Violation {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validation failure carrying every violated constraint
///
/// Violations are collected rather than fail-fast so the caller can render
/// all of them at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// All violation messages, in field order
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.message.clone()).collect()
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "course request validation failed: {}", self.messages().join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// A module within a course request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseModule {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub learning_objectives: Vec<String>,
}

/// Canonical course request
///
/// Field names are a stable wire contract: they double as the keys accepted
/// in structured-update blocks and as the flattened agent input mapping.
/// A value of this type always satisfies the field constraints; the only ways
/// to construct one are [`CourseRequestDraft::validate`] and
/// [`CourseRequest::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRequest {
    pub course_title: String,
    pub course_description: String,
    pub course_credits: u32,
    pub course_duration_weeks: u32,
    pub course_level: String,
    pub course_expectations: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub course_modules: Vec<CourseModule>,
}

impl CourseRequest {
    /// Merge a partial update, returning a new request
    ///
    /// Only the supplied fields are overwritten; everything else is retained.
    /// The merged result is constraint-checked as a whole, and failure leaves
    /// `self` untouched.
    pub fn apply(&self, update: &CourseRequestUpdate) -> Result<CourseRequest, ValidationError> {
        debug!(fields = ?update.touched_fields(), "apply: merging partial update");
        let mut merged = self.clone();
        let mut violations = Vec::new();

        if let Some(title) = &update.course_title {
            merged.course_title = title.trim().to_string();
        }
        if let Some(description) = &update.course_description {
            merged.course_description = description.trim().to_string();
        }
        if let Some(credits) = update.course_credits {
            match u32::try_from(credits) {
                Ok(n) if n > 0 => merged.course_credits = n,
                _ => violations.push(Violation::new("course_credits", CREDITS_MSG)),
            }
        }
        if let Some(weeks) = update.course_duration_weeks {
            match u32::try_from(weeks) {
                Ok(n) if n > 0 => merged.course_duration_weeks = n,
                _ => violations.push(Violation::new("course_duration_weeks", DURATION_MSG)),
            }
        }
        if let Some(level) = &update.course_level {
            merged.course_level = level.clone();
        }
        if let Some(expectations) = &update.course_expectations {
            merged.course_expectations = expectations.trim().to_string();
        }
        if let Some(modules) = &update.course_modules {
            merged.course_modules = modules.clone();
        }

        violations.extend(constraint_violations(&merged));

        if violations.is_empty() {
            Ok(merged)
        } else {
            Err(ValidationError { violations })
        }
    }
}

const TITLE_MSG: &str = "Course title must be at least 5 characters long.";
const DESCRIPTION_MSG: &str = "Course description must be at least 15 characters long.";
const EXPECTATIONS_MSG: &str = "Course expectations must be at least 10 characters long.";
const CREDITS_MSG: &str = "Please enter a valid number of credits.";
const DURATION_MSG: &str = "Duration (weeks) must be greater than 0.";
const LEVEL_MSG: &str = "Course level must not be empty.";

/// Constraint checks shared by initial validation and update merging
fn constraint_violations(request: &CourseRequest) -> Vec<Violation> {
    let mut violations = Vec::new();
    if request.course_title.chars().count() < MIN_TITLE_LEN {
        violations.push(Violation::new("course_title", TITLE_MSG));
    }
    if request.course_description.chars().count() < MIN_DESCRIPTION_LEN {
        violations.push(Violation::new("course_description", DESCRIPTION_MSG));
    }
    if request.course_expectations.chars().count() < MIN_EXPECTATIONS_LEN {
        violations.push(Violation::new("course_expectations", EXPECTATIONS_MSG));
    }
    if request.course_credits == 0 {
        violations.push(Violation::new("course_credits", CREDITS_MSG));
    }
    if request.course_duration_weeks == 0 {
        violations.push(Violation::new("course_duration_weeks", DURATION_MSG));
    }
    if request.course_level.trim().is_empty() {
        violations.push(Violation::new("course_level", LEVEL_MSG));
    }
    violations
}

/// Accept numbers or strings for form fields that should be numeric
///
/// Front ends hand numeric widgets over as numbers, request files as YAML
/// scalars, and a chat prompt as raw text. All of them land here as a string
/// and get parsed during validation, so bad input is a violation, not a crash.
fn stringly<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Raw form values prior to validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseRequestDraft {
    pub course_title: String,
    pub course_description: String,
    #[serde(deserialize_with = "stringly")]
    pub course_credits: String,
    #[serde(deserialize_with = "stringly")]
    pub course_duration_weeks: String,
    pub course_level: String,
    pub course_expectations: String,
    pub course_modules: Vec<CourseModule>,
}

impl CourseRequestDraft {
    /// Validate every field, collecting all violations
    pub fn validate(&self) -> Result<CourseRequest, ValidationError> {
        let mut violations = Vec::new();

        let title = self.course_title.trim();
        if title.chars().count() < MIN_TITLE_LEN {
            violations.push(Violation::new("course_title", TITLE_MSG));
        }
        let description = self.course_description.trim();
        if description.chars().count() < MIN_DESCRIPTION_LEN {
            violations.push(Violation::new("course_description", DESCRIPTION_MSG));
        }
        let expectations = self.course_expectations.trim();
        if expectations.chars().count() < MIN_EXPECTATIONS_LEN {
            violations.push(Violation::new("course_expectations", EXPECTATIONS_MSG));
        }

        let credits = match self.course_credits.trim().parse::<u32>() {
            Ok(n) if n > 0 => n,
            _ => {
                violations.push(Violation::new("course_credits", CREDITS_MSG));
                0
            }
        };
        let duration_weeks = match self.course_duration_weeks.trim().parse::<u32>() {
            Ok(n) if n > 0 => n,
            _ => {
                violations.push(Violation::new("course_duration_weeks", DURATION_MSG));
                0
            }
        };

        if self.course_level.trim().is_empty() {
            violations.push(Violation::new("course_level", LEVEL_MSG));
        }

        if !violations.is_empty() {
            debug!(count = violations.len(), "validate: draft rejected");
            return Err(ValidationError { violations });
        }

        Ok(CourseRequest {
            course_title: title.to_string(),
            course_description: description.to_string(),
            course_credits: credits,
            course_duration_weeks: duration_weeks,
            course_level: self.course_level.clone(),
            course_expectations: expectations.to_string(),
            course_modules: self.course_modules.clone(),
        })
    }
}

/// Partial update extracted from a structured-update block
///
/// Every field is optional; unknown keys in the source block are ignored.
/// Numeric fields accept any integer so an out-of-range value surfaces as a
/// merge failure rather than a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseRequestUpdate {
    pub course_title: Option<String>,
    pub course_description: Option<String>,
    pub course_credits: Option<i64>,
    pub course_duration_weeks: Option<i64>,
    pub course_level: Option<String>,
    pub course_expectations: Option<String>,
    pub course_modules: Option<Vec<CourseModule>>,
}

impl CourseRequestUpdate {
    /// True when no field is supplied
    pub fn is_empty(&self) -> bool {
        self.touched_fields().is_empty()
    }

    /// Names of the supplied fields
    pub fn touched_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.course_title.is_some() {
            fields.push("course_title");
        }
        if self.course_description.is_some() {
            fields.push("course_description");
        }
        if self.course_credits.is_some() {
            fields.push("course_credits");
        }
        if self.course_duration_weeks.is_some() {
            fields.push("course_duration_weeks");
        }
        if self.course_level.is_some() {
            fields.push("course_level");
        }
        if self.course_expectations.is_some() {
            fields.push("course_expectations");
        }
        if self.course_modules.is_some() {
            fields.push("course_modules");
        }
        fields
    }
}
