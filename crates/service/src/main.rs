use std::sync::Arc;

use anyhow::Context;

use service_one::{app, config::ServiceConfig, options::ServiceOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    service_one_observability::init();

    let config = ServiceConfig::from_env().context("invalid configuration")?;
    let opts = Arc::new(ServiceOptions::from_config(&config));

    let router = app::build_app(opts).context("failed to register routes")?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        service = %config.service_name,
        addr = %listener.local_addr()?,
        "listening"
    );

    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
