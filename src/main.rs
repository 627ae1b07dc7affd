use hotel_ops::{config, db, routes, state};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotel_ops=info,tower_http=info".into()),
        )
        .init();

    let config = config::Config::from_env()?;

    let store = db::Store::open(&config.database_url).await?;
    if config.seed_sample_data {
        store.seed_sample_rooms().await?;
    }

    let state = Arc::new(state::AppState::new(store.clone()));
    let app = routes::router(state);

    let addr = config.bind_addr();
    tracing::info!("Hotel ops API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Received CTRL+C, shutting down");
}
