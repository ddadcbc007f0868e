use ms_auth::{IdentityIssuer, Result as AuthErrorResult};
use ms_config::SeedUser;

use log::info;

/// Register the configured accounts. Existing usernames are left untouched.
pub async fn seed_users(issuer: &IdentityIssuer, users: &[SeedUser]) -> AuthErrorResult<()> {
    for user in users {
        let credential = issuer
            .register(&user.username, &user.password, &user.roles)
            .await?;
        info!("Seed user ready: {} {:?}", credential.username, credential.roles);
    }
    Ok(())
}
