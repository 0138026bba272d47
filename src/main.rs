use anyhow::Context;
use tracing_subscriber::EnvFilter;

use cinematch_api::api::{create_router, AppState};
use cinematch_api::config::Config;
use cinematch_api::data::Dataset;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cinematch_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Load the tables and build the model once; both are frozen afterwards.
    let dataset = Dataset::load(&config.data_dir)
        .with_context(|| format!("failed to load dataset from {}", config.data_dir))?;
    tracing::info!(
        movies = dataset.movies.len(),
        ratings = dataset.ratings.len(),
        tags = dataset.tags.len(),
        "dataset loaded"
    );

    let state = AppState::new(dataset, config.neighbor_count, config.session_ttl());

    // The sweeper stops when this handle drops at the end of main.
    let _sweeper = state.sessions.start_sweeper(config.sweep_interval());

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Server running on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
