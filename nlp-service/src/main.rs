use nlp_service::config::NlpConfig;
use nlp_service::handlers::health::SERVICE_NAME;
use nlp_service::services::metrics::init_metrics;
use nlp_service::Application;
use service_core::observability::{init_tracing, shutdown_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = NlpConfig::load()?;

    init_tracing(
        SERVICE_NAME,
        &config.common.log_level,
        config.common.otlp_endpoint.as_deref(),
    );
    init_metrics();

    tracing::info!(
        port = config.common.port,
        model = %config.openai.model,
        "Starting {}",
        SERVICE_NAME
    );

    let application = Application::build(config).await?;
    let result = application.run_until_stopped().await;

    shutdown_tracing();
    result
}
