//! User Service Library
//!
//! User management over HTTP: list, create, update and delete users with
//! validation, name uniqueness and per-operation timing logs. Users live in
//! PostgreSQL when a database URL is configured, in memory otherwise.

pub mod api;
pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::{InMemoryUserStore, UserRepository, UserStore};
use crate::service::UserManager;

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Wire repository, service and state for `config`.
pub async fn build_state(
    config: &UserServiceConfig,
    shutdown: CancellationToken,
) -> Result<AppState, Box<dyn std::error::Error>> {
    let (repo, database): (Arc<dyn UserRepository>, Option<Database>) = match &config.database {
        Some(db_config) => {
            let db = Database::connect(db_config).await?;
            (Arc::new(UserStore::new(db.get_connection())), Some(db))
        }
        None => {
            info!("No database configured, keeping users in memory");
            (Arc::new(InMemoryUserStore::new()), None)
        }
    };

    let user_service = Arc::new(UserManager::new(repo));
    Ok(AppState::new(user_service, database, shutdown))
}

/// Run the HTTP server until `shutdown` is cancelled.
pub async fn run_server(
    config: UserServiceConfig,
    shutdown: CancellationToken,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state(&config, shutdown.clone()).await?;
    let app = create_router(state);

    let addr: SocketAddr = config.service.addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("{} listening on {}", config.service.service_name, addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            info!("HTTP server shutting down gracefully");
        })
        .await?;

    Ok(())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: UserServiceConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db_config = config
        .database
        .ok_or("USER_SERVICE_DATABASE_URL or DATABASE_URL must be set to run migrations")?;
    let db = Database::connect_without_migrations(&db_config).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await? {
                let marker = if applied { "[x]" } else { "[ ]" };
                info!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Cancel `shutdown` on Ctrl+C or SIGTERM.
pub async fn shutdown_on_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
        _ = shutdown.cancelled() => return,
    }

    info!("Shutdown signal received");
    shutdown.cancel();
}
