use crate::{ApiError, ApiResult};

use std::collections::BTreeMap;
use std::panic::Location;

use error_location::ErrorLocation;

/// Collects per-field validation messages for a request body.
///
/// Only the first message recorded for a field is kept.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    /// Record `message` for `field` unless `valid` holds.
    pub fn check(&mut self, valid: bool, field: &str, message: impl Into<String>) {
        if !valid {
            self.add(field, message);
        }
    }

    pub fn require_not_blank(&mut self, field: &str, value: &str) {
        self.check(
            !value.trim().is_empty(),
            field,
            format!("{} is required", field),
        );
    }

    /// Length in characters, both bounds inclusive.
    pub fn check_length(&mut self, field: &str, value: &str, min: usize, max: usize) {
        let length = value.chars().count();
        if length < min || length > max {
            self.add(
                field,
                format!("{} must be between {} and {} characters", field, min, max),
            );
        }
    }

    pub fn check_max_length(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.add(field, format!("{} must not exceed {} characters", field, max));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok` when nothing was recorded, else a 400 carrying every field message.
    #[track_caller]
    pub fn finish(self) -> ApiResult<()> {
        let Some(first) = self.errors.values().next() else {
            return Ok(());
        };

        let message = if self.errors.len() == 1 {
            first.clone()
        } else {
            format!("{} fields are invalid", self.errors.len())
        };

        Err(ApiError::Validation {
            message,
            details: self.errors,
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

/// Structural address check: one `@`, a non-empty local part and a dotted domain.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}
