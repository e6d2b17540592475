use planet_service::config::PlanetConfig;
use planet_service::services::init_metrics;
use planet_service::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PlanetConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        &config.service_name,
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    )?;
    init_metrics()?;

    let application = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start planet-service: {}", e);
        e
    })?;
    application.run_until_stopped().await?;

    Ok(())
}
