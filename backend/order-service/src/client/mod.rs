pub mod error;
pub mod member_client;
pub mod member_directory;
pub mod member_integration;
