use anyhow::Context;
use provider_mocks::{server::shutdown_signal, Config, MockServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("MOCK_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let result = if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };
    result.map_err(|e| anyhow::anyhow!(e))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing()?;

    let config = Config::from_env();
    let quiet = config.quiet;
    let bind_addr = config.bind_addr;

    let server = MockServer::start(config)
        .await
        .with_context(|| format!("failed to bind mock server on {}", bind_addr))?;

    if !quiet {
        info!("🔶 Mock server installed at {}", server.url(""));
    }

    shutdown_signal().await;
    server.shutdown().await.context("mock server did not shut down cleanly")?;
    Ok(())
}
