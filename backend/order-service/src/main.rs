use order_service::{AppState, MemberClient, MemberIntegration, build_router};

use ms_auth::TokenCodec;
use ms_config::{Config, ServiceName};
use ms_db::{ORDER_MIGRATOR, OrderRepository, open_pool};
use ms_resilience::{CircuitBreakerRegistry, CircuitBreakerSettings};

use std::error::Error;
use std::sync::Arc;

use log::info;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = Config::load(ServiceName::Order)?;
    config.validate()?;

    // Initialize logger (before any other logging)
    ms_web::logger::initialize(&config.logging)?;

    info!("Starting order-service v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let metrics = ms_web::install_metrics_recorder()?;

    // Verify-only: tokens are issued by auth-service with the same secret
    let codec = Arc::new(TokenCodec::from_secret(config.auth.jwt_secret.as_deref())?);

    let pool = open_pool(&config.database_path()?, &ORDER_MIGRATOR).await?;

    let registry = CircuitBreakerRegistry::new(CircuitBreakerSettings::from(&config.circuit_breaker));
    let member_client = MemberClient::new(&config.member_client.base_url)?;
    info!("Member service: {}", member_client.base_url);
    let members = MemberIntegration::new(Arc::new(member_client), &registry);

    let state = AppState {
        orders: OrderRepository::new(pool),
        members: Arc::new(members),
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
