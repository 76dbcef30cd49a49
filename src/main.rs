use knowledge_base::catalog::state::CatalogState;
use knowledge_base::config::Config;
use knowledge_base::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    tracing::info!("Data directory: {}", config.data_dir.display());
    tracing::info!("Static files: {}", config.public_dir.display());

    // 1. Catalog state (data files + search index):
    let state = CatalogState::open(&config.data_dir, config.admin.clone()).await?;

    // 2. HTTP Router:
    let app = server::router(state, &config);

    // 3. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
