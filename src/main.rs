use std::sync::Arc;

use anyhow::Context;
use email_classifier::analysis::HttpEmailAnalyzer;
use email_classifier::api::{self, AppState};
use email_classifier::config::AppConfig;
use email_classifier::extract::DocumentTextExtractor;
use email_classifier::logging;
use email_classifier::nlp::PortugueseNormalizer;
use email_classifier::pipeline::AnalysisOrchestrator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real env vars still apply
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    let _log_guard = logging::init(config.debug, &config.log_dir)
        .with_context(|| format!("Failed to prepare log directory {}", config.log_dir.display()))?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        debug = config.debug,
        "Email classifier starting"
    );

    // ── Pipeline ────────────────────────────────────────────────────────
    let analyzer = HttpEmailAnalyzer::new(&config.analysis).context("Failed to build HTTP client")?;
    let orchestrator = Arc::new(AnalysisOrchestrator::new(
        Arc::new(DocumentTextExtractor::new()),
        Arc::new(PortugueseNormalizer::new()),
        Arc::new(analyzer),
    ));

    // ── HTTP server ─────────────────────────────────────────────────────
    let app = api::router(AppState { orchestrator }, &config.server.cors_origins);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(addr = %addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("Email classifier stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
