//! Error types
//!
//! Input validation failures, malformed reference data and loading errors.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// What is wrong with a single input field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldProblem {
    /// Required field absent, null or empty
    Missing,
    /// Value present but not a number
    NotNumeric,
    /// Number is zero, negative or not finite
    NotPositive,
    /// Label not one of the accepted values
    Unrecognized,
}

impl FieldProblem {
    /// Message fragment shown after the field name
    pub fn describe(&self) -> &'static str {
        match self {
            FieldProblem::Missing => "is required",
            FieldProblem::NotNumeric => "is not a number",
            FieldProblem::NotPositive => "must be greater than zero",
            FieldProblem::Unrecognized => "is not a recognized value",
        }
    }
}

/// One offending input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: &'static str,
    pub problem: FieldProblem,
}

impl FieldIssue {
    /// Create a new issue
    pub fn new(field: &'static str, problem: FieldProblem) -> Self {
        Self { field, problem }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.problem.describe())
    }
}

/// Every invalid field of one measurement record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid measurements: {}", join_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Names of the offending fields, in input order
    pub fn fields(&self) -> Vec<&'static str> {
        self.issues.iter().map(|issue| issue.field).collect()
    }

    /// Check whether a field was reported
    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Calculator error types
#[derive(Debug, Error)]
pub enum CalcError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid reference data: {0}")]
    ReferenceData(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_every_field() {
        let err = ValidationError {
            issues: vec![
                FieldIssue::new("height", FieldProblem::Missing),
                FieldIssue::new("waist", FieldProblem::NotPositive),
            ],
        };
        let message = err.to_string();
        assert!(message.contains("height is required"));
        assert!(message.contains("waist must be greater than zero"));
        assert_eq!(err.fields(), vec!["height", "waist"]);
    }

    #[test]
    fn test_calc_error_wraps_validation() {
        let err: CalcError = ValidationError {
            issues: vec![FieldIssue::new("unit", FieldProblem::Unrecognized)],
        }
        .into();
        assert!(matches!(err, CalcError::Validation(_)));
        assert_eq!(err.to_string(), "Invalid measurements: unit is not a recognized value");
    }
}
