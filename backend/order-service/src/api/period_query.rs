use ms_web::{ApiError, ApiResult};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

/// `?startDate=2024-01-01T00:00:00&endDate=2024-12-31T23:59:59`
///
/// Values without an offset are read as UTC.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
    pub start_date: String,
    pub end_date: String,
}

impl PeriodQuery {
    pub fn range(&self) -> ApiResult<(DateTime<Utc>, DateTime<Utc>)> {
        let start = parse_timestamp("startDate", &self.start_date)?;
        let end = parse_timestamp("endDate", &self.end_date)?;

        if start > end {
            return Err(ApiError::validation(
                "startDate",
                "startDate must not be after endDate",
            ));
        }

        Ok((start, end))
    }
}

fn parse_timestamp(field: &str, value: &str) -> ApiResult<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| {
            ApiError::validation(
                field,
                format!("{} must be an ISO-8601 date-time, got '{}'", field, value),
            )
        })
}
