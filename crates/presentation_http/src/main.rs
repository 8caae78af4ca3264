//! WaDesk HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use application::{
    HealthConfig, HealthService, NumberValidationService, SessionService,
    StoreDefaultSessionResolver,
};
use infrastructure::{
    AppConfig, AsyncDatabase, AsyncDatabaseConfig, Environment, InMemoryClientRegistry, LogFormat,
    SqliteSessionStore, WhatsAppClientConnector, init_telemetry,
};
use presentation_http::{error::set_expose_internal_errors, routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration before logging so the log format can be honoured
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_telemetry(&config.telemetry, LogFormat::from(&config.server))?;

    info!("WaDesk v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(e) = config_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    let environment = config.environment();
    for warning in config.warnings() {
        if environment == Environment::Production {
            anyhow::bail!("Refusing to start in production: {warning}");
        }
        warn!("{warning}");
    }
    set_expose_internal_errors(environment != Environment::Production);

    info!(
        host = %config.server.host,
        port = %config.server.port,
        environment = %environment,
        gateway = %config.whatsapp.base_url,
        "Configuration loaded"
    );

    // Database
    let db = AsyncDatabase::new(&AsyncDatabaseConfig::from_app_config(&config.database)).await?;
    if config.database.is_in_memory() {
        warn!("Using an in-memory database; sessions are lost on restart");
    }
    if config.database.run_migrations {
        db.migrate().await?;
    }

    // Ports
    let store = Arc::new(SqliteSessionStore::new(db.pool().clone()));
    let registry = Arc::new(InMemoryClientRegistry::new());
    let connector = Arc::new(WhatsAppClientConnector::new(config.whatsapp.clone()));
    let resolver = Arc::new(StoreDefaultSessionResolver::new(store.clone()));

    // Services
    let session_service = Arc::new(SessionService::new(
        store,
        registry.clone(),
        connector,
    ));
    let number_validation = Arc::new(NumberValidationService::new(
        resolver.clone(),
        registry.clone(),
    ));
    let health_service = Arc::new(
        HealthService::new(resolver, registry)
            .with_config(HealthConfig {
                timeout_secs: config.whatsapp.request_timeout_secs,
            })
            .with_database(Arc::new(db.clone())),
    );

    if config.whatsapp.auto_start_sessions {
        let report = session_service.start_all_sessions().await?;
        info!(
            started = report.started.len(),
            failed = report.failed.len(),
            "Stored sessions started"
        );
    }

    let state = AppState {
        number_validation,
        session_service,
        health_service,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = routes::create_router(state);

    // Configure CORS layer
    let cors_layer = if config.server.allowed_origins.is_empty() {
        // Development mode: allow all origins
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use axum::http::{HeaderValue, Method};
        let origins: Vec<HeaderValue> = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
            .allow_headers(Any)
    };

    // Add middleware (order matters: last added = outermost)
    let app = app
        .layer(RequestBodyLimitLayer::new(
            config.server.max_body_size_json_bytes,
        ))
        .layer(TraceLayer::new_for_http());
    let app = if config.server.cors_enabled {
        app.layer(cors_layer)
    } else {
        app
    };

    // Start server
    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);

    let shutdown_timeout = config.server.shutdown_timeout();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    db.close().await;
    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
}
