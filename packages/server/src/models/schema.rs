//! Field-level constraints shared by every resource.
//!
//! A [`Schema`] collects violations for one entity and reports them all at
//! once, in the order the fields were checked.

use std::fmt;

use regex::Regex;
use thiserror::Error;

/// A single violated constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Input rejected by an entity schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{entity} validation failed: {}", join(.errors))]
pub struct ValidationError {
    pub entity: &'static str,
    pub errors: Vec<FieldError>,
}

fn join(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Accumulates constraint violations for one entity.
pub struct Schema {
    entity: &'static str,
    errors: Vec<FieldError>,
}

impl Schema {
    pub fn new(entity: &'static str) -> Self {
        Self {
            entity,
            errors: Vec::new(),
        }
    }

    pub fn reject(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Require a present, non-empty string.
    pub fn required(
        &mut self,
        field: &'static str,
        value: Option<String>,
        message: &str,
    ) -> Option<String> {
        match value {
            Some(v) if !v.is_empty() => Some(v),
            _ => {
                self.reject(field, message);
                None
            }
        }
    }

    /// Like [`Schema::required`], but whitespace-only strings count as
    /// missing. The value is returned as sent.
    pub fn required_nonblank(
        &mut self,
        field: &'static str,
        value: Option<String>,
        message: &str,
    ) -> Option<String> {
        match value {
            Some(v) if !v.trim().is_empty() => Some(v),
            _ => {
                self.reject(field, message);
                None
            }
        }
    }

    /// Check the length in characters, skipping values that already failed.
    pub fn min_length(&mut self, field: &'static str, value: Option<&str>, min: usize, message: &str) {
        if let Some(v) = value
            && v.chars().count() < min
        {
            self.reject(field, message);
        }
    }

    pub fn pattern(&mut self, field: &'static str, value: Option<&str>, re: &Regex, message: String) {
        if let Some(v) = value
            && !re.is_match(v)
        {
            self.reject(field, message);
        }
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                entity: self.entity,
                errors: self.errors,
            })
        }
    }
}
