//! User Service Library
//!
//! Stores user records enriched from demographic inference services and the
//! friendships between them, exposed over a small HTTP API.

pub mod api;
pub mod config;
pub mod enrichment;
pub mod infra;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{create_router, with_request_timeout, AppState};
use crate::config::UserServiceConfig;
use crate::enrichment::DemographicsClient;
use crate::infra::Database;
use crate::repository::{FriendshipStore, UserStore};
use crate::service::UserManager;

/// Run the HTTP server until Ctrl-C or SIGTERM.
pub async fn run_server(config: UserServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize database
    let db = Database::connect(&config.database).await?;
    let db_conn = db.get_connection();

    // Create repositories, enrichment client and service
    let users = Arc::new(UserStore::new(db_conn.clone()));
    let friendships = Arc::new(FriendshipStore::new(db_conn));
    let demographics = Arc::new(DemographicsClient::new(config.enrichment.clone()));
    let user_service = Arc::new(UserManager::new(users, friendships, demographics));

    // Build router
    let router = create_router(AppState::new(user_service));
    let app = with_request_timeout(router, config.server.request_timeout())
        .layer(TraceLayer::new_for_http());

    // Build address
    let addr: SocketAddr = config.server.addr().parse()?;
    info!(%addr, environment = %config.environment, "User service listening");

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("User service stopped");
    Ok(())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    action: MigrateAction,
    config: UserServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

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
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
    }

    info!("Received shutdown signal, draining connections...");
}
