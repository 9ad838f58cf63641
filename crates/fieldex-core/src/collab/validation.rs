//! Handoff to field validators.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::field::FieldCandidate;

/// Canonical field name to value, as a validator consumes it.
///
/// Several candidates may resolve to the same canonical field; the first one
/// in the list (highest confidence) wins.
pub fn validation_input(fields: &[FieldCandidate]) -> BTreeMap<String, Value> {
    let mut input = BTreeMap::new();
    for field in fields {
        input
            .entry(field.matched_field.clone())
            .or_insert_with(|| Value::String(field.value.clone()));
    }
    input
}

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        f.write_str(name)
    }
}

/// One finding about one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity,
        }
    }
}

/// Findings grouped by severity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub schema_id: String,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub info: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new(schema_id: impl Into<String>) -> Self {
        Self {
            schema_id: schema_id.into(),
            ..Self::default()
        }
    }

    /// File an issue under its severity.
    pub fn push(&mut self, issue: ValidationIssue) {
        match issue.severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
            Severity::Info => self.info.push(issue),
        }
    }

    /// Valid when nothing was filed as an error.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn issue_count(&self) -> usize {
        self.errors.len() + self.warnings.len() + self.info.len()
    }
}

/// A validator that checks canonical fields against a schema.
pub trait FieldValidator {
    fn validate(&self, fields: &BTreeMap<String, Value>, schema_id: &str) -> ValidationReport;
}

/// Reports missing or blank required fields.
#[derive(Debug, Clone, Default)]
pub struct RequiredFields {
    required: Vec<String>,
}

impl RequiredFields {
    pub fn new<I, S>(required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: required.into_iter().map(Into::into).collect(),
        }
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }
}

impl FieldValidator for RequiredFields {
    fn validate(&self, fields: &BTreeMap<String, Value>, schema_id: &str) -> ValidationReport {
        let mut report = ValidationReport::new(schema_id);

        for name in &self.required {
            match fields.get(name) {
                None | Some(Value::Null) => report.push(ValidationIssue::new(
                    name.as_str(),
                    format!("Field '{}' is required", name),
                    Severity::Error,
                )),
                Some(Value::String(s)) if s.trim().is_empty() => report.push(ValidationIssue::new(
                    name.as_str(),
                    format!("Field '{}' is required", name),
                    Severity::Error,
                )),
                Some(_) => {}
            }
        }

        let extra = fields
            .keys()
            .filter(|name| !self.required.contains(name))
            .count();
        if extra > 0 {
            report.push(ValidationIssue::new(
                "*",
                format!("{} field(s) not covered by the required list", extra),
                Severity::Info,
            ));
        }

        report
    }
}
