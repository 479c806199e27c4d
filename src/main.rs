//! nlp-gateway - standalone REST server for text analysis.
//!
//! See `nlp-gateway --help` for flags; each falls back to an
//! `NLP_GATEWAY_*` environment variable.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use nlp_gateway::config::Config;
use nlp_gateway::language::BuiltinPipeline;
use nlp_gateway::router::build_router;
use nlp_gateway::service::TextAnalyzer;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,nlp_gateway=debug,tower_http=info".into()),
        )
        .init();

    let config = Config::parse();

    let model = config.load_model().with_context(|| match &config.model_path {
        Some(path) => format!("failed to load language model from {}", path.display()),
        None => "failed to load built-in language model".to_string(),
    })?;
    tracing::info!(model = model.name(), "Language model loaded");

    let analyzer = TextAnalyzer::new(Arc::new(BuiltinPipeline::new(Arc::new(model))));
    let app = build_router(analyzer, config.max_body_bytes);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;
    tracing::info!("nlp-gateway listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("nlp-gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
