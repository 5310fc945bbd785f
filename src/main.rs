use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod err_responses;
mod razorpay;
mod sanity;

#[derive(Clone)]
struct AppState {
    config: config::Config,
    store: Arc<dyn sanity::OrderStore>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orderhook=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from_env();
    let store = Arc::new(sanity::SanityClient::new(
        reqwest::Client::new(),
        &config.sanity,
    ));

    let state = AppState {
        config: config.clone(),
        store,
    };

    let router = Router::new()
        .nest("/api/razorpay", razorpay::router(state))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;

    Ok(())
}
