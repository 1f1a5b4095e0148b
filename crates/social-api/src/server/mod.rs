//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use social_common::{AppConfig, AppError, JwtService};
use social_core::SnowflakeGenerator;
use social_db::{
    create_pool, run_migrations, PgFollowRepository, PgLikeRepository, PgMediaRepository,
    PgNotificationRepository, PgPool, PgPostRepository, PgSearchRepository, PgTimelineRepository,
    PgUserRepository,
};
use social_service::services::ORPHAN_GRACE_HOURS;
use social_service::{MediaService, MediaStore, ServiceContextBuilder};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

use crate::middleware::{apply_middleware, MiddlewareSettings};
use crate::routes::{create_router, health_routes, upload_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes sit outside the rate limiter.
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let settings = MiddlewareSettings {
        rate_limit: &config.rate_limit,
        cors: &config.cors,
        body_limit: config.storage.body_limit(),
        is_production: config.app.env.is_production(),
    };

    let api = create_router().merge(upload_routes(&config.storage.upload_dir));
    let api = apply_middleware(api, settings)?;

    Ok(api.merge(health_routes()).with_state(state))
}

/// Connect to PostgreSQL, apply migrations when enabled, and build AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = social_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    create_app_state_with_pool(pool, config)
}

/// Build AppState over an existing pool
pub fn create_app_state_with_pool(pool: PgPool, config: AppConfig) -> Result<AppState, AppError> {
    let jwt_service = Arc::new(JwtService::from_config(&config.jwt));
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let service_context = ServiceContextBuilder::new()
        .pool(pool.clone())
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .post_repo(Arc::new(PgPostRepository::new(pool.clone())))
        .like_repo(Arc::new(PgLikeRepository::new(pool.clone())))
        .follow_repo(Arc::new(PgFollowRepository::new(pool.clone())))
        .notification_repo(Arc::new(PgNotificationRepository::new(pool.clone())))
        .media_repo(Arc::new(PgMediaRepository::new(pool.clone())))
        .timeline_repo(Arc::new(PgTimelineRepository::new(pool.clone())))
        .search_repo(Arc::new(PgSearchRepository::new(pool)))
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .storage(config.storage.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Create the image and video directories under the upload root
pub async fn prepare_storage(config: &AppConfig) -> Result<(), AppError> {
    MediaStore::new(&config.storage)
        .ensure_dirs()
        .await
        .map_err(|e| AppError::Storage(format!("failed to create upload directories: {e}")))?;
    info!(upload_dir = %config.storage.upload_dir, "Upload directories ready");
    Ok(())
}

/// Periodically delete media that was uploaded but never attached
///
/// Does nothing when the configured interval is zero.
pub fn spawn_orphan_sweeper(state: &AppState) {
    let interval_secs = state.config().storage.orphan_sweep_interval_secs;
    if interval_secs == 0 {
        return;
    }

    let state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
        // The first tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            let service = MediaService::new(state.service_context());
            match service
                .cleanup_orphaned_media(chrono::Duration::hours(ORPHAN_GRACE_HOURS))
                .await
            {
                Ok(count) => {
                    if count > 0 {
                        info!(count, "Orphaned media sweep completed");
                    }
                }
                Err(e) => error!(error = %e, "Orphaned media sweep failed"),
            }
        }
    });

    info!(interval_secs, "Orphaned media sweeper started");
}

/// Run the HTTP server until Ctrl+C or SIGTERM
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("invalid listen address: {e}")))?;

    prepare_storage(&config).await?;

    let state = create_app_state(config).await?;
    spawn_orphan_sweeper(&state);

    let app = create_app(state)?;

    run_server(app, addr).await
}
