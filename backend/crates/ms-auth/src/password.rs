//! Password hashing with bcrypt.

use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

/// bcrypt work factor
pub const BCRYPT_COST: u32 = 10;

/// Hash a plaintext password.
#[track_caller]
pub fn hash_password(password: &str) -> AuthErrorResult<String> {
    bcrypt::hash(password, BCRYPT_COST).map_err(|e| AuthError::PasswordHash {
        source: e,
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Check a plaintext password against a stored hash.
#[track_caller]
pub fn verify_password(password: &str, hash: &str) -> AuthErrorResult<bool> {
    bcrypt::verify(password, hash).map_err(|e| AuthError::PasswordHash {
        source: e,
        location: ErrorLocation::from(Location::caller()),
    })
}
