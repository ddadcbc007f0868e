pub mod health;
pub mod login;
pub mod login_request;
