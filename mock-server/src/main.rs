use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let count = std::env::var("PRODUCT_COUNT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(mock_server::DEFAULT_PRODUCT_COUNT);

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, products = count, "listening");
    mock_server::run_with_catalog(listener, mock_server::seed_catalog(count)).await
}
