use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Gateway startup errors
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid header name '{name}' {location}")]
    HeaderName { name: String, location: ErrorLocation },

    #[error("HTTP client error: {message} {location}")]
    Client {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },
}

impl From<reqwest::Error> for GatewayError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Client {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
