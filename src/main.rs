use std::sync::Arc;

use tokio::net::TcpListener;

use journal_api::adapters::ai::OpenAIProvider;
use journal_api::adapters::analysis::LlmEntryAnalyzer;
use journal_api::adapters::http::{app_router, EntryAppState};
use journal_api::adapters::postgres::PostgresEntryRepository;
use journal_api::adapters::storage::InMemoryEntryRepository;
use journal_api::application::EntryService;
use journal_api::config::{AppConfig, StorageBackend};
use journal_api::ports::EntryRepository;
use journal_api::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server.log_level, config.features.json_logs);
    config.validate()?;

    tracing::info!(
        storage = ?config.storage.backend,
        model = %config.ai.model,
        "Journal API starting"
    );
    if !config.ai.has_api_key() {
        tracing::warn!("No AI API key configured; analysis requests will fail");
    }

    let policy = config.features.policy();
    let repository: Arc<dyn EntryRepository> = match config.storage.backend {
        StorageBackend::Postgres => {
            let db = &config.database;
            let pool = db.pool_options().connect(&db.url).await?;

            if db.run_migrations {
                tracing::info!("Running database migrations...");
                sqlx::migrate!("./migrations").run(&pool).await?;
            }

            Arc::new(PostgresEntryRepository::with_policy(pool, policy))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; entries are lost on restart");
            Arc::new(InMemoryEntryRepository::with_policy(policy))
        }
    };

    let provider = OpenAIProvider::new(config.ai.openai_config())?;
    let analyzer = LlmEntryAnalyzer::new(Arc::new(provider)).with_temperature(config.ai.temperature);
    let service = EntryService::new(repository, Arc::new(analyzer));

    let app = app_router(EntryAppState::new(Arc::new(service)), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to setup SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Ctrl+C received, initiating graceful shutdown"),
        _ = terminate => tracing::info!("SIGTERM received, initiating graceful shutdown"),
    }
}
