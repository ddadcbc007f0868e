use member_service::{AppState, build_router};

use ms_auth::TokenCodec;
use ms_config::{Config, ServiceName};
use ms_db::{MEMBER_MIGRATOR, MemberRepository, open_pool};

use std::error::Error;
use std::sync::Arc;

use log::info;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = Config::load(ServiceName::Member)?;
    config.validate()?;

    // Initialize logger (before any other logging)
    ms_web::logger::initialize(&config.logging)?;

    info!("Starting member-service v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let metrics = ms_web::install_metrics_recorder()?;

    // Verify-only: tokens are issued by auth-service with the same secret
    let codec = Arc::new(TokenCodec::from_secret(config.auth.jwt_secret.as_deref())?);

    let pool = open_pool(&config.database_path()?, &MEMBER_MIGRATOR).await?;

    let state = AppState {
        members: MemberRepository::new(pool),
        codec,
    };
    let app = build_router(state, metrics);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(ms_web::shutdown_signal())
        .await?;

    info!("Graceful shutdown complete");
    Ok(())
}
