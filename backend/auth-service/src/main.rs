use auth_service::{AppState, build_router, seed_users};

use ms_auth::{IdentityIssuer, TokenCodec};
use ms_config::{Config, ServiceName};
use ms_db::{AUTH_MIGRATOR, CredentialRepository, open_pool};

use std::error::Error;
use std::sync::Arc;

use log::info;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = Config::load(ServiceName::Auth)?;
    config.validate()?;

    // Initialize logger (before any other logging)
    ms_web::logger::initialize(&config.logging)?;

    info!("Starting auth-service v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let metrics = ms_web::install_metrics_recorder()?;

    // Fails fast on a missing or short secret
    let codec = Arc::new(TokenCodec::from_secret(config.auth.jwt_secret.as_deref())?);

    let pool = open_pool(&config.database_path()?, &AUTH_MIGRATOR).await?;
    let store = Arc::new(CredentialRepository::new(pool));

    let issuer = Arc::new(IdentityIssuer::new(
        store,
        codec,
        config.auth.access_token_validity_secs,
    ));
    seed_users(&issuer, &config.auth.seed_users).await?;

    let app = build_router(AppState { issuer }, metrics);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(ms_web::shutdown_signal())
        .await?;

    info!("Graceful shutdown complete");
    Ok(())
}
