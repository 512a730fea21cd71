//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, worker spawning, and Axum
//! server lifecycle.

use crate::api::middleware::rate_limit::RateLimiting;
use crate::application::services::run_session_purger;
use crate::config::Config;
use crate::domain::audit_worker::{AuditRecorder, run_audit_worker};
use crate::routes::app_router;
use crate::state::{AppState, Repositories, SessionSettings};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use chrono::Duration as SessionDuration;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Background audit worker and hourly expired-session sweep
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let repositories = Repositories::postgres(Arc::new(pool));

    let (audit_recorder, audit_rx) = AuditRecorder::channel(config.audit_queue_capacity);
    let worker = tokio::spawn(run_audit_worker(
        audit_rx,
        repositories.audit.clone(),
        repositories.history.clone(),
    ));
    tracing::info!("Audit worker started");

    let state = AppState::new(
        repositories,
        config.keyword_set(),
        audit_recorder,
        SessionSettings {
            secret: config.session_secret.clone(),
            ttl: SessionDuration::hours(i64::from(config.session_ttl_hours)),
            cookie_secure: config.cookie_secure,
        },
    );

    let purger = tokio::spawn(run_session_purger(
        state.auth_service.clone(),
        SESSION_PURGE_INTERVAL,
    ));

    let app = app_router(state, RateLimiting::from_behind_proxy(config.behind_proxy));

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    purger.abort();

    // The router (and with it every AuditRecorder) is gone; let the worker drain.
    if let Err(e) = worker.await {
        tracing::warn!(error = %e, "Audit worker ended abnormally");
    }

    Ok(())
}

async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
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
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
