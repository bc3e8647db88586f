use std::sync::Arc;

use movie_browser::{
    config::Config,
    db,
    routes::{create_router, AppState},
    services::{AnalyticsRecorder, MovieProvider, TmdbProvider},
    view::{Debouncer, ViewController},
};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_browser=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let provider: Arc<dyn MovieProvider> = Arc::new(TmdbProvider::from_config(&config)?);
    let store = db::connect(&config).await?;
    let (recorder, recorder_handle) = AnalyticsRecorder::new(store, &config.poster_base_url);

    let controller = ViewController::new(provider.clone(), recorder.clone(), config.trending_limit);
    let input = Arc::new(Debouncer::spawn("", config.debounce()));
    let view_task = tokio::spawn(controller.clone().run(input.subscribe()));

    let state = Arc::new(AppState {
        controller,
        input,
        recorder,
        provider,
        trending_limit: config.trending_limit,
    });
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        debounce_ms = config.debounce_ms,
        "Server running"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    view_task.abort();
    recorder_handle.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
