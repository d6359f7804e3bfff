use std::sync::Arc;
use std::time::Duration;

use platform_service::bootstrap::ensure_superadmin;
use platform_service::config::Config;
use platform_service::domain::identity::service::AuthService;
use platform_service::domain::restaurant::service::RestaurantService;
use platform_service::inbound::http::router::create_router;
use platform_service::inbound::http::router::AppState;
use platform_service::outbound::health::PostgresHealthCheck;
use platform_service::outbound::repositories::PostgresIdentityRepository;
use platform_service::outbound::repositories::PostgresRestaurantRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "platform_service=debug,auth=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "platform-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        request_timeout_secs = config.server.request_timeout_secs,
        access_ttl_minutes = config.jwt.access_ttl_minutes,
        refresh_ttl_hours = config.jwt.refresh_ttl_hours,
        password_memory_kib = config.password.memory_kib,
        bootstrap = config.bootstrap.is_some(),
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(config.authenticator()?);
    let identity_repository = Arc::new(PostgresIdentityRepository::new(pg_pool.clone()));
    let restaurant_repository = Arc::new(PostgresRestaurantRepository::new(pg_pool.clone()));

    if let Some(bootstrap) = &config.bootstrap {
        let outcome =
            ensure_superadmin(identity_repository.as_ref(), &authenticator, bootstrap).await?;
        tracing::info!(outcome = ?outcome, "Superadmin bootstrap completed");
    }

    let state = AppState {
        auth_service: Arc::new(AuthService::new(
            identity_repository,
            Arc::clone(&authenticator),
        )),
        restaurant_service: Arc::new(RestaurantService::new(restaurant_repository)),
        health_check: Arc::new(PostgresHealthCheck::new(pg_pool)),
        access_policy: authenticator.access_policy(),
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
