use quire::{
    build_router,
    config::Config,
    state::AppState,
    storage::{BookStore, FilesystemBookStore},
};
use quire_resource::FilesystemResourceProvider;
use quire_traits::ResourceProvider;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Rendering allocates many short-lived buffers per export.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting Quire export service...");

    let config = Config::load()?;
    tracing::info!("Configuration loaded");

    let store = FilesystemBookStore::new(config.storage.books_dir.clone())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize book store: {}", e))?;
    let store: Arc<dyn BookStore> = Arc::new(store);
    tracing::info!("Book store at {}", config.storage.books_dir.display());

    let resources: Arc<dyn ResourceProvider> =
        Arc::new(FilesystemResourceProvider::new(&config.storage.assets_dir));
    tracing::info!("Assets served from {}", config.storage.assets_dir.display());

    if config.auth.tokens.is_empty() {
        tracing::warn!("No bearer tokens configured; every export request will be rejected");
    }

    let addr = config.bind_address();
    let concurrency = config.export.concurrency();
    let app = build_router(AppState::new(config, store, resources));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Quire listening on {} ({} concurrent exports)", addr, concurrency);
    tracing::info!("Endpoints:");
    tracing::info!("  - GET /api/export/:id/pdf");
    tracing::info!("  - GET /api/export/:id/doc");
    tracing::info!("  - GET /health");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    // `init` also routes `log` records from the render crates into tracing.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,quire=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
