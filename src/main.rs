use anyhow::Context;
use chamados_search_api::api::{self, AppState};
use chamados_search_api::config::AppConfig;
use chamados_search_api::storage::{ChamadoStore, LinearScan, SearchBackend};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("🚀 Starting Chamados Search API");

    // Load configuration
    let config = AppConfig::load()?;
    info!("📋 Configuration loaded");
    info!("   - Server: {}:{}", config.server.host, config.server.port);

    // Initialize record store
    let store = match &config.storage.seed_path {
        Some(path) => ChamadoStore::from_json_file(path)?,
        None => ChamadoStore::seed(),
    };
    info!("✅ Record store ready ({} chamados)", store.len());

    let search_backend: Arc<dyn SearchBackend> = Arc::new(LinearScan::new(Arc::new(store)));
    info!("🔍 Search backend: {}", search_backend.name());

    let app = api::router(AppState { search_backend });

    // Start server
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .inspect_err(|e| error!("Failed to bind {}: {}", addr, e))
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🌐 Server listening on http://{}", addr);
    info!(
        "   Check http://localhost:{}/api/health for status",
        config.server.port
    );
    info!("📡 Available endpoints:");
    info!("   GET  /api/search?q=&page=   - Search chamados");
    info!("   GET  /api/health            - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
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

    info!("🛑 Shutdown signal received");
}
