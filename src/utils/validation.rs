//! Field-level validation helpers
//!
//! Request payloads collect every problem into a [`FieldErrors`] map before
//! anything reaches the policy engine or the menu service.

use crate::utils::error::{AdminError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Validation messages keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field
    pub fn add<F: Into<String>, S: Into<String>>(&mut self, field: F, message: S) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages recorded for a field
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `Ok(())` when nothing was recorded, a validation error otherwise
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AdminError::Validation(self))
        }
    }

    /// Require a non-blank string, returning it trimmed
    pub fn require(&mut self, field: &str, value: Option<&str>, message: &str) -> Option<String> {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => {
                self.check_length(field, v);
                Some(v.to_string())
            }
            _ => {
                self.add(field, message);
                None
            }
        }
    }

    /// A field that may be omitted but must not be blank when present
    pub fn sometimes(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        let value = value?;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.add(field, format!("The {} field must not be empty", field));
            None
        } else {
            self.check_length(field, trimmed);
            Some(trimmed.to_string())
        }
    }

    fn check_length(&mut self, field: &str, value: &str) {
        if value.chars().count() > MAX_STRING_LENGTH {
            self.add(
                field,
                format!(
                    "The {} field must not be greater than {} characters",
                    field, MAX_STRING_LENGTH
                ),
            );
        }
    }
}

/// Upper bound applied to every free-text field
pub const MAX_STRING_LENGTH: usize = 255;

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Parse the boolean flags accepted in query strings (`1`/`0`/`true`/`false`)
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}
