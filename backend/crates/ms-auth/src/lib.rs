pub mod authenticated_user;
pub mod bearer;
pub mod claims;
pub mod credential_store;
pub mod error;
pub mod identity_issuer;
pub mod password;
pub mod token_codec;

pub use authenticated_user::AuthenticatedUser;
pub use bearer::{BEARER_PREFIX, bearer_token};
pub use claims::Claims;
pub use credential_store::CredentialStore;
pub use error::{AuthError, Result};
pub use identity_issuer::{IdentityIssuer, IssuedToken, TOKEN_TYPE};
pub use password::{BCRYPT_COST, hash_password, verify_password};
pub use token_codec::{MIN_SECRET_BYTES, TokenCodec};

#[cfg(test)]
mod tests;
