use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use std::sync::Arc;

mod config;
mod lottie;
mod routes;

use config::Config;
use lottie::client::LottieClient;
use routes::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lottie_proxy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let cache = lottie::init_cache(&config);
    let lottie_client = Arc::new(LottieClient::new(config.clone())?);

    let bind_addr = config.bind_addr.clone();
    tracing::info!(
        "Proxying {} (cache ttl {}s, max {} entries)",
        config.lottie_api_url,
        config.cache_ttl_secs,
        config.cache_max_entries
    );

    let state = AppState {
        config: Arc::new(config),
        lottie_client,
        cache,
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server starting on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
