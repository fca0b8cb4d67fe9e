use std::path::PathBuf;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusBuilder;

use agentflow_engine::chain::DegradationChain;
use agentflow_engine::config;
use agentflow_engine::orchestration::{HttpOrchestrationEngine, OrchestrationEngine};
use agentflow_engine::routes::{self, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("AgentFlow report service starting");

    // Fail loudly on misconfiguration.
    let config_dir = std::env::var("AGENTFLOW_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    let engine_config = match config::load_config(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration, refusing to start");
            std::process::exit(1);
        }
    };

    let metrics_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");

    // Without an engine the chain starts at the cache stage.
    let engine = HttpOrchestrationEngine::new(
        &engine_config.system.engine,
        engine_config.system.retry.clone(),
    )
    .map(|e| Arc::new(e) as Arc<dyn OrchestrationEngine>);

    let chain = DegradationChain::from_config(&engine_config, engine);
    tracing::info!(
        engine_configured = chain.has_engine(),
        cache_enabled = chain.cache().is_some(),
        "Degradation chain ready"
    );

    let port: u16 = std::env::var("AGENTFLOW_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(engine_config.system.server.port);

    let state = Arc::new(AppState {
        chain,
        config: engine_config,
        metrics_handle,
    });
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind TCP listener");

    tracing::info!(port = port, "AgentFlow report service listening");

    axum::serve(listener, app).await.expect("HTTP server error");
}
