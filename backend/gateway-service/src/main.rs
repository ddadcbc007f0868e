use gateway_service::{AppState, build_router};

use ms_auth::TokenCodec;
use ms_config::{Config, ServiceName};
use ms_resilience::{CircuitBreakerRegistry, CircuitBreakerSettings};

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use log::info;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = Config::load(ServiceName::Gateway)?;
    config.validate()?;

    // Initialize logger (before any other logging)
    ms_web::logger::initialize(&config.logging)?;

    info!("Starting gateway-service v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let metrics = ms_web::install_metrics_recorder()?;

    let codec = Arc::new(TokenCodec::from_secret(config.auth.jwt_secret.as_deref())?);
    let registry = CircuitBreakerRegistry::new(CircuitBreakerSettings::from(&config.circuit_breaker));

    let state = AppState::new(codec, config.gateway.clone(), registry)?;
    let app = build_router(state, metrics);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    // Peer addresses feed the client IP in request logs
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(ms_web::shutdown_signal())
    .await?;

    info!("Graceful shutdown complete");
    Ok(())
}
