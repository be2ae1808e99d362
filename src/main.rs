use std::sync::Arc;

use notes_api::{
    config,
    repository::{Database, PgRepository},
    service::NoteService,
};

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Fetch env variables
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load configuration: {e}");
        panic!("failed to load configuration: {e}");
    });

    // Database handle and schema bootstrap
    let database = Database::new(&cfg.database_url, cfg.db_max_sessions).unwrap_or_else(|e| {
        tracing::error!("Invalid database connection string: {e}");
        panic!("invalid database connection string: {e}");
    });
    tracing::info!(
        "Using database {} with at most {} sessions",
        database.describe(),
        cfg.db_max_sessions
    );

    let repo = PgRepository::new(database.clone());
    repo.ensure_schema().await.unwrap_or_else(|e| {
        tracing::error!("Failed to prepare database schema: {e}");
        panic!("failed to prepare database schema: {e}");
    });

    // Service creation
    let service = Arc::new(NoteService::new(Arc::new(repo)));

    let router = notes_api::app(service, &cfg);

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr.as_str())
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind {}: {e}", cfg.bind_addr);
            panic!("failed to bind {}: {e}", cfg.bind_addr);
        });

    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Started listening on {}", addr);
    }

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("HTTP server error: {e}");
    }

    // Teardown
    database.close();
    tracing::info!("Server stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {e}");
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
                tracing::error!("failed to listen for SIGTERM: {e}");
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

    tracing::info!("Shutdown signal received, draining connections");
}
