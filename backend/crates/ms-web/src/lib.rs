//! HTTP plumbing shared by every service binary.

pub mod actuator;
pub mod authenticated;
pub mod client_ip;
pub mod error;
pub mod logger;
pub mod paging;
pub mod server_error;
pub mod shutdown;
pub mod validation;

pub use actuator::{actuator_router, health_body, install_metrics_recorder};
pub use authenticated::{Authenticated, authenticate_headers};
pub use client_ip::extract_client_ip;
pub use error::{ApiError, ApiErrorBody, Result as ApiResult};
pub use paging::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageQuery};
pub use server_error::{Result as ServerErrorResult, ServerError};
pub use shutdown::shutdown_signal;
pub use validation::{FieldErrors, is_valid_email};

#[cfg(test)]
mod tests;
