use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::domain::FieldPath;

/// Which rule a field broke.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RuleViolation {
    #[error("value is required")]
    Required,
    #[error("value has an invalid format")]
    Format,
    #[error("value must have at least {min} characters")]
    Length { min: usize },
    #[error("list must have at least {min} entries")]
    MinCount { min: usize },
    #[error("value is not a number")]
    Type,
    #[error("value must be between {min} and {max}")]
    Range { min: f64, max: f64 },
}

impl RuleViolation {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleViolation::Required => "required",
            RuleViolation::Format => "format",
            RuleViolation::Length { .. } => "length",
            RuleViolation::MinCount { .. } => "min_count",
            RuleViolation::Type => "type",
            RuleViolation::Range { .. } => "range",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub path: FieldPath,
    #[serde(serialize_with = "serialize_violation")]
    pub kind: RuleViolation,
    pub message: String,
}

impl FieldError {
    pub fn new(path: FieldPath, kind: RuleViolation, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
        }
    }
}

fn serialize_violation<S: Serializer>(kind: &RuleViolation, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(kind.as_str())
}

/// Every violation found in one validation pass, in field order.
///
/// Holds at most one entry per path.
#[derive(Debug, Clone, Default, PartialEq, Error, Serialize)]
#[error("{} field(s) failed validation", .errors.len())]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `error` unless its path already has one.
    pub fn push(&mut self, error: FieldError) {
        if !self.contains(&error.path) {
            self.errors.push(error);
        }
    }

    pub fn get(&self, path: &FieldPath) -> Option<&FieldError> {
        self.errors.iter().find(|error| &error.path == path)
    }

    pub fn message(&self, path: &FieldPath) -> Option<&str> {
        self.get(path).map(|error| error.message.as_str())
    }

    pub fn contains(&self, path: &FieldPath) -> bool {
        self.get(path).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldPathError {
    #[error("field path is empty")]
    Empty,
    #[error("field path has an empty segment: {0}")]
    EmptySegment(String),
    #[error("invalid index in field path: {0}")]
    InvalidIndex(String),
}
