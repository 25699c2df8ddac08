//! seller-server entry point

use seller_server::{AppState, Config, build_app};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenv::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "seller_server=info,variation_engine=info,shop_client=info,tower_http=info".into()
            }),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!(
        environment = %config.environment,
        shop_id = config.shop_id,
        api = %config.shop_api_url,
        "Starting seller-server"
    );

    let state = AppState::new(&config)?;
    let app = build_app(state);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("seller-server HTTP listening on {http_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("seller-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}
