use std::time::Duration;

use anyhow::Result;
use rmcp::ServiceExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather_tools::{Lifecycle, WeatherConfig, WeatherTools};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_tools=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Working directory: {:?}", std::env::current_dir().ok());
    tracing::info!("Starting MCP weather server with stdio transport");

    let lifecycle = Lifecycle::new();
    lifecycle.listen_for_signals();

    let weather = WeatherTools::new(WeatherConfig::default(), lifecycle.token())?;
    let result = match weather
        .serve_with_ct(rmcp::transport::stdio(), lifecycle.token())
        .await
    {
        Ok(server) => server.waiting().await.map(|reason| {
            if lifecycle.is_shutting_down() {
                tracing::info!("MCP server stopped by signal: {:?}", reason);
            } else {
                tracing::info!("MCP server stopped, input closed: {:?}", reason);
            }
        }),
        Err(e) => {
            tracing::error!("Error running MCP server: {}", e);
            lifecycle.shutdown(SHUTDOWN_GRACE).await;
            return Err(e.into());
        }
    };

    lifecycle.shutdown(SHUTDOWN_GRACE).await;
    result?;
    Ok(())
}
