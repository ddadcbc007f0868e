use crate::ErrorLocation;

use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid member status: {value} {location}")]
    InvalidMemberStatus {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid order status: {value} {location}")]
    InvalidOrderStatus {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid amount: {message} {location}")]
    InvalidAmount {
        message: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
