//! Summarizer HTTP server.

use clap::Parser;
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::info;

use groq_summarizer::observability::{init_tracing, LogFormat};
use groq_summarizer::{
    server, AppConfig, GroqChatModel, GroqClientBuilder, SummarizeChain,
};

#[derive(Parser)]
#[command(name = "groq-summarizer")]
#[command(author, version, about = "Text summarization service backed by Groq")]
struct Cli {
    /// Host to bind (overrides SUMMARIZER_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides SUMMARIZER_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Base path of the summarize routes (overrides SUMMARIZER_PATH)
    #[arg(long)]
    path: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing(LogFormat::from_env()?);

    let cli = Cli::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(path) = cli.path {
        config.server = config.server.with_route_path(path)?;
    }

    let client = GroqClientBuilder::from_config(config.groq.clone()).build()?;
    let model = GroqChatModel::new(Arc::new(client), config.model.clone());
    let chain = SummarizeChain::summarize(Arc::new(model));

    let app = server::router(Arc::new(chain), &config.server);

    let listener = tokio::net::TcpListener::bind(config.server.bind_address()).await?;
    info!(
        model = %config.model.model,
        route = %config.server.route_path,
        "listening on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
