use anyhow::Context;
use podcast_api::retry::RetryPolicy;
use podcast_api::{AppConfig, AppState, LogFormat, build_router};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("loading configuration from environment")?;
    init_tracing(config.server.log_format)?;

    let retry = RetryPolicy::from(&config.retry);
    info!(
        provider = ?config.llm.provider,
        model = config.llm.model.as_deref().unwrap_or("default"),
        failure_policy = ?config.failure_policy,
        max_retries = retry.max_retries(),
        max_body_bytes = config.server.max_body_bytes,
        "Configuration loaded"
    );

    let bind_addr = config.server.bind_addr.clone();
    let state = Arc::new(AppState::new(config).context("building language model client")?);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {}", bind_addr))?;

    info!(addr = %bind_addr, version = env!("CARGO_PKG_VERSION"), "Server listening");

    let server = axum::serve(listener, app).with_graceful_shutdown(async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Shutdown signal received");
    });

    if let Err(e) = server.await {
        error!(error = %e, "Server error");
    }

    Ok(())
}

fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {e}"))
}
