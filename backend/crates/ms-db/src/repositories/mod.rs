pub mod credential_repository;
pub mod member_repository;
pub mod order_repository;

use crate::DbError;

use error_location::ErrorLocation;

use std::panic::Location;

use chrono::{DateTime, Utc};

/// Decode a stored unix-seconds column.
#[track_caller]
pub(crate) fn timestamp(table: &'static str, column: &str, secs: i64) -> Result<DateTime<Utc>, DbError> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| DbError::InvalidRow {
        table,
        message: format!("Invalid timestamp in {}: {}", column, secs),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Wrap a search fragment for `LIKE ? ESCAPE '\'`, matching wildcards literally.
pub(crate) fn like_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
