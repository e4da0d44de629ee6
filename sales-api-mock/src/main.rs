use sales_api_mock::{MockState, app, sample_sales};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let seed: usize = std::env::var("SEED_SALES")
        .ok()
        .and_then(|n| n.parse().ok())
        .unwrap_or(120);

    let state = MockState::with_sales(sample_sales(seed));
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("Mock sales API listening on http://{}/api", listener.local_addr()?);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
