use common::TelemetryGuard;
use gateway::{
    AppState, UpstreamClient, config::get_configuration, logging::setup_logging, router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_configuration()?;

    let _telemetry = match config.otel_endpoint.as_ref() {
        Some(endpoint) => Some(TelemetryGuard::init(
            "gateway",
            endpoint,
            config.log_level,
            config.environment,
        )?),
        None => {
            setup_logging(&config);
            None
        }
    };

    tracing::info!(
        environment = config.environment.as_str(),
        upstream = %config.upstream_url,
        max_body_bytes = config.max_body_bytes,
        "Gateway starting"
    );

    let state = AppState::new(UpstreamClient::new(config.upstream_url.clone()));
    let app = router(state, config.max_body_bytes);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("Gateway listening on {}", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
