use std::sync::Arc;

use planner::api::router;
use planner::config::AppConfig;
use planner::dashboard::NoopTrendFeed;
use planner::state::AppState;
use planner::store::{Seed, Store};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "planner=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::new_from_env()?;

    let seed = match &config.seed_path {
        Some(path) => {
            info!("seeding store from {}", path.display());
            Seed::from_path(path)?
        }
        None => Seed::default(),
    };
    info!(
        "store ready: {} courses, {} assignments, {} grades",
        seed.courses.len(),
        seed.assignments.len(),
        seed.grades.len()
    );

    let state = AppState {
        store: Arc::new(Store::from_seed(seed, config.latency)?),
        trends: Arc::new(NoopTrendFeed),
    };

    let app = router(state);

    info!("listening on http://{}", config.addr);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
